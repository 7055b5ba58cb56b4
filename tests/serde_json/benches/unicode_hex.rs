#[cfg(debug_assertions)]
fn main() {}
#[cfg(not(debug_assertions))]
fn main() {
  // Generate a string which will be ~256 MB once serialized
  let mut string = String::with_capacity(256 * 1024 * 1024);
  while string.len() < (256 * 1024 * 1024) {
    string.push_str("\\u2764\\ufe0f");
  }
  let serialization = "[\"".to_string() + &string + "\"]";
  drop(string);

  {
    let start = std::time::Instant::now();
    let _ = core::hint::black_box(
      serde_json::from_reader::<&[u8], serde_json::Value>(serialization.as_bytes()).unwrap(),
    );
    println!(
      "serde_json took {}ms to deserialize a 256 MB Unicode (hex) string",
      start.elapsed().as_millis()
    );
  }

  let value = {
    let start = std::time::Instant::now();
    let value = willow_json::Value::<willow_json::Ordered>::parse(&serialization).unwrap();
    println!(
      "willow-json took {}ms to deserialize a 256 MB Unicode (hex) string",
      start.elapsed().as_millis()
    );
    value
  };
  drop(serialization);

  {
    let start = std::time::Instant::now();
    let config = willow_json::DumpConfig::compact().with_escape_unicode(true);
    let _ = core::hint::black_box(value.dump_with(&config));
    println!(
      "willow-json took {}ms to serialize a 256 MB Unicode (hex) string",
      start.elapsed().as_millis()
    );
  }
}
