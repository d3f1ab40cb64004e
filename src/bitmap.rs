//! Free-space bitmaps for the inode table and the data region.
//! Bit `i` is set iff slot `i` is in use. Bits are numbered least-significant first within a byte.

use tracing::trace;

use crate::error::{FsError, Result};

/// Bitmap over a contiguous byte range of the volume.
/// `B` is `&[u8]` for a read-only view and `&mut [u8]` for allocation.
#[derive(Debug)]
pub struct Bitmap<B> {
    bytes: B,
    /// Number of tracked slots, never more than `bytes.len() * 8`.
    capacity: usize,
}

impl<B: AsRef<[u8]>> Bitmap<B> {
    /// Tracks every bit of `bytes`.
    pub fn new(bytes: B) -> Self {
        let capacity = bytes.as_ref().len() * 8;
        Self { bytes, capacity }
    }

    /// Tracks only the first `capacity` bits of `bytes`.
    pub fn with_capacity(bytes: B, capacity: usize) -> Result<Self> {
        let bits = bytes.as_ref().len() * 8;
        if capacity > bits {
            return Err(FsError::BitmapTooSmall { slots: capacity, bits });
        }
        Ok(Self { bytes, capacity })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the lowest unset slot.
    pub fn find_next_free(&self) -> Result<usize> {
        for (byte_index, &byte) in self.bytes.as_ref().iter().enumerate() {
            if byte == u8::MAX {
                continue;
            }
            let slot = byte_index * 8 + byte.trailing_ones() as usize;
            if slot < self.capacity {
                return Ok(slot);
            }
            break;
        }
        Err(FsError::BitmapExhausted)
    }

    pub fn is_allocated(&self, slot: usize) -> Result<bool> {
        let (byte, mask) = self.locate(slot)?;
        Ok(self.bytes.as_ref()[byte] & mask != 0)
    }

    pub fn allocated_count(&self) -> usize {
        (0..self.capacity)
            .filter(|&slot| self.bytes.as_ref()[slot / 8] & (1 << (slot % 8)) != 0)
            .count()
    }

    pub fn free_count(&self) -> usize {
        self.capacity - self.allocated_count()
    }

    /// Owning byte and bit mask of `slot`.
    fn locate(&self, slot: usize) -> Result<(usize, u8)> {
        if slot >= self.capacity {
            return Err(FsError::BlockOutOfRange { index: slot });
        }
        Ok((slot / 8, 1 << (slot % 8)))
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> Bitmap<B> {
    pub fn reserve(&mut self, slot: usize) -> Result<()> {
        let (byte, mask) = self.locate(slot)?;
        let bits = &mut self.bytes.as_mut()[byte];
        if *bits & mask != 0 {
            return Err(FsError::AlreadyAllocated { slot });
        }
        *bits |= mask;
        trace!(slot, "reserved");
        Ok(())
    }

    pub fn release(&mut self, slot: usize) -> Result<()> {
        let (byte, mask) = self.locate(slot)?;
        let bits = &mut self.bytes.as_mut()[byte];
        if *bits & mask == 0 {
            return Err(FsError::AlreadyFree { slot });
        }
        *bits &= !mask;
        trace!(slot, "released");
        Ok(())
    }

    /// Reserves the lowest free slot and returns it.
    /// Takes `&mut self`, so nothing can allocate between the scan and the reservation.
    pub fn allocate(&mut self) -> Result<usize> {
        let slot = self.find_next_free()?;
        self.reserve(slot)?;
        Ok(slot)
    }

    /// Zeroes the whole byte range, including bits past `capacity`.
    pub fn reset(&mut self) {
        self.bytes.as_mut().fill(0);
    }
}
