#![allow(non_snake_case)]

#[cfg(test)]
mod tests {
  use std::fs;

  use willow_json::{Ordered, Value, ParseConfig, ParseErrorKind};

  #[test]
  fn pass() {
    let mut i = 0;
    for file in fs::read_dir("./vectors").unwrap() {
      let file = file.unwrap();
      let name = file.file_name();
      let name = name.to_str().unwrap();
      if !name.starts_with("pass") {
        continue;
      }
      i += 1;

      dbg!(name);

      let path = file.path();
      let encoding = fs::read(path).unwrap();

      let value = serde_json::from_slice::<serde_json::Value>(&encoding).unwrap();
      willow_json_serde_json_tests::check_value(&encoding, &value);
    }
    assert_eq!(i, 3);
  }

  #[test]
  fn fail() {
    let mut i = 0;
    for file in fs::read_dir("./vectors").unwrap() {
      let file = file.unwrap();
      let name = file.file_name();
      let name = name.to_str().unwrap();
      if !name.starts_with("fail") {
        continue;
      }
      i += 1;

      let path = file.path();
      let bytes = fs::read(path).unwrap();
      let bytes = bytes.as_slice();

      match name {
        // RFC 8259 allows any value at the top level
        "fail1.json" => {
          assert!(Value::<Ordered>::parse_slice(bytes).unwrap().is_string());
          continue;
        }
        // Nesting is only bounded if a limit is configured
        "fail18.json" => {
          assert!(Value::<Ordered>::parse_slice(bytes).is_ok());
          let config = ParseConfig::default().with_max_depth(19);
          let source = willow_json::io::Utf8Source::new(bytes);
          let e = Value::<Ordered>::parse_source_with(source, &config).unwrap_err();
          assert_eq!(e.kind, ParseErrorKind::TooDeep);
          continue;
        }
        _ => {}
      }

      let Err(e) = Value::<Ordered>::parse_slice(bytes) else { panic!("did not error for {name}") };
      dbg!((name, e));
    }
    assert_eq!(i, 33);
  }

  #[test]
  fn depth_limit() {
    let encoding = fs::read("./vectors/pass2.json").unwrap();
    let config = ParseConfig::default().with_max_depth(19);
    let source = willow_json::io::Utf8Source::new(&encoding);
    assert!(Value::<Ordered>::parse_source_with(source, &config).is_ok());
    let config = ParseConfig::default().with_max_depth(18);
    let source = willow_json::io::Utf8Source::new(&encoding);
    assert_eq!(
      Value::<Ordered>::parse_source_with(source, &config).unwrap_err().kind,
      ParseErrorKind::TooDeep
    );
  }
}
