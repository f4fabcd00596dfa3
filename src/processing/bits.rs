//! MSB-first conversion between bytes and single bits.
//!
//! Bit 7 of the first byte comes out first. Both directions use the same order,
//! which is part of the on-image format.

/// Iterator over the bits (`0` or `1`) of a byte stream, most significant first.
#[derive(Debug, Clone)]
pub struct MsbBits<I> {
    bytes: I,
    current: u8,
    remaining: u8,
}

impl<I> Iterator for MsbBits<I>
where
    I: Iterator<Item = u8>,
{
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            self.current = self.bytes.next()?;
            self.remaining = 8;
        }

        self.remaining -= 1;
        Some((self.current >> self.remaining) & 1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (low, high) = self.bytes.size_hint();
        let pending = self.remaining as usize;
        (
            low.saturating_mul(8).saturating_add(pending),
            high.and_then(|h| h.checked_mul(8)?.checked_add(pending)),
        )
    }
}

pub fn msb_bits<B>(bytes: B) -> MsbBits<B::IntoIter>
where
    B: IntoIterator<Item = u8>,
{
    MsbBits {
        bytes: bytes.into_iter(),
        current: 0,
        remaining: 0,
    }
}

/// Fill `out` from `bits`, eight bits per byte, MSB first.
///
/// Only the lowest bit of each item is used. Returns the number of bytes that were
/// completely filled; a trailing partial byte is left as zero-padded garbage in
/// `out` and not counted.
pub fn pack_msb<I>(bits: &mut I, out: &mut [u8]) -> usize
where
    I: Iterator<Item = u8>,
{
    for (filled, slot) in out.iter_mut().enumerate() {
        let mut byte = 0u8;
        for _ in 0..8 {
            match bits.next() {
                Some(bit) => byte = (byte << 1) | (bit & 1),
                None => return filled,
            }
        }
        *slot = byte;
    }

    out.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msb_first_order() {
        let bits: Vec<u8> = msb_bits([0b1000_0001u8, 0b0100_0000]).collect();
        assert_eq!(
            bits,
            vec![1, 0, 0, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_size_hint_counts_bits() {
        let mut bits = msb_bits(vec![0xAAu8, 0x55, 0xFF]);
        assert_eq!(bits.size_hint(), (24, Some(24)));
        bits.next();
        assert_eq!(bits.size_hint(), (23, Some(23)));
    }

    #[test]
    fn test_pack_inverts_msb_bits() {
        let data = b"hi!\x00\xff";
        let mut bits = msb_bits(data.iter().copied());
        let mut out = [0u8; 5];
        assert_eq!(pack_msb(&mut bits, &mut out), 5);
        assert_eq!(&out, data);
        assert!(bits.next().is_none());
    }

    #[test]
    fn test_pack_stops_on_short_input() {
        let mut bits = [1u8, 1, 1, 1, 1, 1, 1, 1, 0, 1].into_iter();
        let mut out = [0u8; 2];
        assert_eq!(pack_msb(&mut bits, &mut out), 1);
        assert_eq!(out[0], 0xFF);
    }

    #[test]
    fn test_pack_ignores_high_bits() {
        let mut bits = [0xFEu8, 0xFF, 0, 0, 0, 0, 0, 1].into_iter();
        let mut out = [0u8; 1];
        pack_msb(&mut bits, &mut out);
        assert_eq!(out[0], 0b0100_0001);
    }
}
