//! # Word Memory Tests
//!
//! Bounds and alignment checking of the flat word memory.

use archlab_core::common::error::SimError;
use archlab_core::units::WordMemory;

#[test]
fn write_then_read_back() {
    let mut mem = WordMemory::new(64);
    mem.write_word(8, 0xDEAD_BEEF).unwrap();
    assert_eq!(mem.read_word(8).unwrap(), 0xDEAD_BEEF);
}

#[test]
fn misaligned_address_rejected() {
    let mem = WordMemory::new(64);
    assert!(matches!(
        mem.read_word(6),
        Err(SimError::MisalignedAddress(6))
    ));
}

#[test]
fn out_of_range_address_rejected() {
    let mut mem = WordMemory::new(64);
    assert!(matches!(
        mem.write_word(64, 1),
        Err(SimError::AddressOutOfRange(64))
    ));
}

#[test]
fn load_words_fills_from_zero() {
    let mut mem = WordMemory::new(64);
    mem.load_words(&[1, 2, 3]).unwrap();
    assert_eq!(mem.read_word(0).unwrap(), 1);
    assert_eq!(mem.read_word(8).unwrap(), 3);
    assert_eq!(mem.read_word(12).unwrap(), 0);
}

#[test]
fn load_words_rejects_oversized_image() {
    let mut mem = WordMemory::new(8);
    assert!(mem.load_words(&[0; 3]).is_err());
}

#[test]
fn clear_zeroes_everything() {
    let mut mem = WordMemory::new(16);
    mem.write_word(0, 9).unwrap();
    mem.clear();
    assert_eq!(mem.read_word(0).unwrap(), 0);
}
