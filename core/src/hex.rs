/// Decode four hexadecimal digits, most-significant first, into a UTF-16 code unit.
#[must_use]
#[inline(always)]
pub(crate) fn decode(hex: [char; 4]) -> Option<u16> {
  let mut res = 0;
  for c in hex {
    // `to_digit(16)` is at most 15, which always fits
    res = (res << 4) | u16::try_from(c.to_digit(16)?).ok()?;
  }
  Some(res)
}

/// Encode a UTF-16 code unit as four lowercase hexadecimal digits, most-significant first.
#[must_use]
#[inline(always)]
pub(crate) fn encode(unit: u16) -> [char; 4] {
  #[inline(always)]
  fn nibble(nibble: u16) -> char {
    char::from(b"0123456789abcdef"[usize::from(nibble & 0xf)])
  }
  [nibble(unit >> 12), nibble(unit >> 8), nibble(unit >> 4), nibble(unit)]
}

#[test]
fn test_hex() {
  assert_eq!(decode(['0', '0', '4', '1']), Some(0x41));
  assert_eq!(decode(['D', '8', '3', 'd']), Some(0xd83d));
  assert_eq!(decode(['f', 'f', 'f', 'g']), None);
  assert_eq!(decode(['+', '1', '2', '3']), None);
  assert_eq!(encode(0xd83d), ['d', '8', '3', 'd']);
  for unit in u16::MIN ..= u16::MAX {
    assert_eq!(decode(encode(unit)), Some(unit));
  }
}
