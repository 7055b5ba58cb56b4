//! UTF-16 surrogate pair arithmetic.
//!
//! JSON's `\u` escapes are UTF-16 code units, so characters outside of the Basic Multilingual
//! Plane are escaped as a pair of surrogates.

/// The first lead (high) surrogate.
pub const LEAD_SURROGATE_MIN: u16 = 0xd800;
/// The last lead (high) surrogate.
pub const LEAD_SURROGATE_MAX: u16 = 0xdbff;
/// The first trail (low) surrogate.
pub const TRAIL_SURROGATE_MIN: u16 = 0xdc00;
/// The last trail (low) surrogate.
pub const TRAIL_SURROGATE_MAX: u16 = 0xdfff;
/// The first character which requires a surrogate pair.
pub const SURROGATE_OFFSET: u32 = 0x1_0000;

/// If this code unit is a lead surrogate.
#[must_use]
#[inline(always)]
pub const fn is_lead_surrogate(unit: u16) -> bool {
  matches!(unit, LEAD_SURROGATE_MIN ..= LEAD_SURROGATE_MAX)
}

/// If this code unit is a trail surrogate.
#[must_use]
#[inline(always)]
pub const fn is_trail_surrogate(unit: u16) -> bool {
  matches!(unit, TRAIL_SURROGATE_MIN ..= TRAIL_SURROGATE_MAX)
}

/// Combine a surrogate pair into the character it represents.
///
/// Returns `None` if `lead` isn't a lead surrogate or `trail` isn't a trail surrogate.
#[must_use]
#[inline(always)]
pub fn combine_surrogates(lead: u16, trail: u16) -> Option<char> {
  if !(is_lead_surrogate(lead) && is_trail_surrogate(trail)) {
    return None;
  }
  let high = u32::from(lead - LEAD_SURROGATE_MIN);
  let low = u32::from(trail - TRAIL_SURROGATE_MIN);
  char::from_u32(SURROGATE_OFFSET + ((high << 10) | low))
}

/// Split a character into the surrogate pair representing it.
///
/// Returns `None` if the character is within the Basic Multilingual Plane, where it's
/// representable as a single code unit.
#[must_use]
#[inline(always)]
pub fn split_surrogates(c: char) -> Option<(u16, u16)> {
  let offset = u32::from(c).checked_sub(SURROGATE_OFFSET)?;
  // `offset` is at most 20 bits, so both halves are at most 10 bits
  let high = u16::try_from(offset >> 10).ok()?;
  let low = u16::try_from(offset & 0x3ff).ok()?;
  Some((LEAD_SURROGATE_MIN + high, TRAIL_SURROGATE_MIN + low))
}

#[test]
fn test_surrogates() {
  for c in ['\u{10000}', '\u{1f600}', '\u{10ffff}'] {
    let mut units = [0; 2];
    let units = c.encode_utf16(&mut units);
    assert_eq!(split_surrogates(c), Some((units[0], units[1])));
    assert_eq!(combine_surrogates(units[0], units[1]), Some(c));
  }
  assert_eq!(split_surrogates('a'), None);
  assert_eq!(split_surrogates('\u{ffff}'), None);

  // Reversed pairs and non-surrogates are rejected
  assert_eq!(combine_surrogates(0xde00, 0xd83d), None);
  assert_eq!(combine_surrogates(0xd83d, 0xd83d), None);
  assert_eq!(combine_surrogates(0xd83d, u16::from(b'a')), None);
}
