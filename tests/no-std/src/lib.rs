#![cfg_attr(not(test), no_std)]

extern crate alloc;
use alloc::string::String;

pub use willow_json;
pub use willow_json_embedded_io;

use willow_json::{Ordered, Value, DumpConfig};
use willow_json_embedded_io::ReadAdapter;

/// Parse a document from a byte reader and serialize it again, all without `std`.
pub fn reserialize(bytes: &[u8], config: &DumpConfig) -> Option<String> {
  let value = Value::<Ordered>::parse_source(ReadAdapter::from(bytes)).ok()?;
  Some(value.dump_with(config))
}

#[test]
fn test_reserialize() {
  let document = "{ \"b\": [1, 2.5, null], \"a\": \"\u{e9}\" }";
  assert_eq!(
    reserialize(document.as_bytes(), &DumpConfig::compact()).unwrap(),
    "{\"b\":[1,2.5,null],\"a\":\"\u{e9}\"}"
  );
  assert!(reserialize(b"[1,", &DumpConfig::compact()).is_none());
}
