//! Byte storage on NOR flash
//!
//! Each byte address is a key in a sequential-storage map, which takes
//! care of wear leveling and of recovering from interrupted writes.

use core::ops::Range;

use embedded_storage_async::nor_flash::NorFlash;
use sequential_storage::cache::NoCache;
use sequential_storage::map;

use crate::storage::{ByteStorage, StorageError};

/// Value read back from a never-written address
pub const ERASED_VALUE: u8 = 0xFF;

/// Scratch space for one map item (header, key and value)
const ITEM_BUFFER_LEN: usize = 64;

/// Byte storage on an erase-aligned range of NOR flash
///
/// The range must span at least two erase sectors.
pub struct MapStorage<F> {
    flash: F,
    range: Range<u32>,
}

impl<F: NorFlash> MapStorage<F> {
    pub fn new(flash: F, range: Range<u32>) -> Self {
        Self { flash, range }
    }

    /// Flash range holding the map
    pub fn range(&self) -> Range<u32> {
        self.range.clone()
    }

    /// Give back the flash
    pub fn into_inner(self) -> F {
        self.flash
    }

    /// Wipe every stored byte
    pub async fn erase_all(&mut self) -> Result<(), StorageError> {
        self.flash
            .erase(self.range.start, self.range.end)
            .await
            .map_err(|_| StorageError::Write)
    }
}

impl<F: NorFlash> ByteStorage for MapStorage<F> {
    async fn read_byte(&mut self, address: u16) -> Result<u8, StorageError> {
        let mut data_buffer = [0u8; ITEM_BUFFER_LEN];

        let result = map::fetch_item::<u16, &[u8], _>(
            &mut self.flash,
            self.range.clone(),
            &mut NoCache::new(),
            &mut data_buffer,
            &address,
        )
        .await;

        match result {
            Ok(Some(data)) => Ok(data.first().copied().unwrap_or(ERASED_VALUE)),
            Ok(None) => Ok(ERASED_VALUE),
            Err(_) => Err(StorageError::Read),
        }
    }

    async fn write_byte(&mut self, address: u16, value: u8) -> Result<(), StorageError> {
        let mut data_buffer = [0u8; ITEM_BUFFER_LEN];
        let data: &[u8] = &[value];

        map::store_item(
            &mut self.flash,
            self.range.clone(),
            &mut NoCache::new(),
            &mut data_buffer,
            &address,
            &data,
        )
        .await
        .map_err(|_| StorageError::Write)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embedded_storage_async::nor_flash::{ErrorType, NorFlashErrorKind, ReadNorFlash};

    const SECTOR: usize = 256;

    /// RAM model of NOR flash: writes can only clear bits
    struct MockFlash {
        data: Vec<u8>,
        erases: usize,
        fail_writes: bool,
    }

    impl MockFlash {
        fn new(sectors: usize) -> Self {
            Self {
                data: vec![0xFF; sectors * SECTOR],
                erases: 0,
                fail_writes: false,
            }
        }
    }

    impl ErrorType for MockFlash {
        type Error = NorFlashErrorKind;
    }

    impl ReadNorFlash for MockFlash {
        const READ_SIZE: usize = 1;

        async fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
            let start = offset as usize;
            let src = self
                .data
                .get(start..start + bytes.len())
                .ok_or(NorFlashErrorKind::OutOfBounds)?;
            bytes.copy_from_slice(src);
            Ok(())
        }

        fn capacity(&self) -> usize {
            self.data.len()
        }
    }

    impl NorFlash for MockFlash {
        const WRITE_SIZE: usize = 4;
        const ERASE_SIZE: usize = SECTOR;

        async fn erase(&mut self, from: u32, to: u32) -> Result<(), Self::Error> {
            if self.fail_writes {
                return Err(NorFlashErrorKind::Other);
            }
            self.data[from as usize..to as usize].fill(0xFF);
            self.erases += 1;
            Ok(())
        }

        async fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
            if self.fail_writes {
                return Err(NorFlashErrorKind::Other);
            }
            if offset as usize % Self::WRITE_SIZE != 0 {
                return Err(NorFlashErrorKind::NotAligned);
            }
            for (cell, byte) in self.data[offset as usize..].iter_mut().zip(bytes) {
                *cell &= *byte;
            }
            Ok(())
        }
    }

    fn region() -> Range<u32> {
        SECTOR as u32..5 * SECTOR as u32
    }

    fn storage() -> MapStorage<MockFlash> {
        MapStorage::new(MockFlash::new(5), region())
    }

    #[test]
    fn test_fresh_region_reads_erased() {
        let mut s = storage();
        assert_eq!(block_on(s.read_byte(0)), Ok(ERASED_VALUE));
        assert_eq!(block_on(s.read_byte(9)), Ok(ERASED_VALUE));
    }

    #[test]
    fn test_write_read_and_reopen() {
        let mut s = storage();
        block_on(s.write_byte(0, 3)).unwrap();
        block_on(s.write_byte(5, 9)).unwrap();
        block_on(s.write_byte(0, 4)).unwrap();
        assert_eq!(block_on(s.read_byte(0)), Ok(4));

        let mut s = MapStorage::new(s.into_inner(), region());
        assert_eq!(block_on(s.read_byte(0)), Ok(4));
        assert_eq!(block_on(s.read_byte(5)), Ok(9));
        assert_eq!(block_on(s.read_byte(1)), Ok(ERASED_VALUE));
    }

    #[test]
    fn test_repeated_writes_cycle_sectors() {
        let mut s = storage();
        block_on(s.write_byte(7, 42)).unwrap();
        for i in 0..500u32 {
            block_on(s.write_byte(0, (i % 5) as u8)).unwrap();
        }
        assert_eq!(block_on(s.read_byte(0)), Ok(4));
        assert_eq!(block_on(s.read_byte(7)), Ok(42));

        let flash = s.into_inner();
        assert!(flash.erases > 0);
        // Flash outside the range is untouched
        assert!(flash.data[..SECTOR].iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_write_failure_reported() {
        let mut flash = MockFlash::new(5);
        flash.fail_writes = true;
        let mut s = MapStorage::new(flash, region());
        assert_eq!(block_on(s.write_byte(0, 1)), Err(StorageError::Write));
    }

    #[test]
    fn test_erase_all_forgets_values() {
        let mut s = storage();
        block_on(s.write_byte(2, 6)).unwrap();
        block_on(s.erase_all()).unwrap();
        assert_eq!(block_on(s.read_byte(2)), Ok(ERASED_VALUE));
        assert_eq!(s.range(), region());
    }
}
