#[cfg(debug_assertions)]
fn main() {}
#[cfg(not(debug_assertions))]
fn main() {
  // Generate a 256 MB string inside an array
  let string = [String::from_utf8(vec![b'A'; 256 * 1024 * 1024]).unwrap()];

  {
    let start = std::time::Instant::now();
    let mut serialization = vec![];
    serde_json::to_writer(&mut serialization, &string).unwrap();
    let _ = core::hint::black_box(serialization);
    println!(
      "serde_json took {}ms to serialize a 256 MB ASCII string",
      start.elapsed().as_millis()
    );
  }

  let value = [willow_json::Value::from(string[0].as_str())];
  let value = value.into_iter().collect::<willow_json::Value<willow_json::Ordered>>();
  {
    let start = std::time::Instant::now();
    let _ = core::hint::black_box(value.dump());
    println!(
      "willow-json took {}ms to serialize a 256 MB ASCII string",
      start.elapsed().as_millis()
    );
  }
  drop(value);

  let serialization = "[\"".to_string() + &string[0] + "\"]";
  drop(string);

  {
    let start = std::time::Instant::now();
    let _ = core::hint::black_box(
      serde_json::from_reader::<&[u8], serde_json::Value>(serialization.as_bytes()).unwrap(),
    );
    println!(
      "serde_json took {}ms to deserialize a 256 MB ASCII string",
      start.elapsed().as_millis()
    );
  }

  {
    let start = std::time::Instant::now();
    let _ = core::hint::black_box(
      willow_json::Value::<willow_json::Ordered>::parse(&serialization).unwrap(),
    );
    println!(
      "willow-json took {}ms to deserialize a 256 MB ASCII string",
      start.elapsed().as_millis()
    );
  }

  {
    let start = std::time::Instant::now();
    let _ = core::hint::black_box(
      willow_json::Value::<willow_json::Ordered>::parse_slice(serialization.as_bytes()).unwrap(),
    );
    println!(
      "willow-json took {}ms to deserialize a 256 MB ASCII string from bytes",
      start.elapsed().as_millis()
    );
  }
}
