//! Persistent storage abstractions
//!
//! The display only needs a handful of bytes that survive power loss, so
//! storage is modeled like a small EEPROM: byte reads and writes at fixed
//! addresses. Flash-backed implementations are async, so the trait is too.

/// Errors from storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Underlying read failed
    Read,
    /// Underlying write or erase failed
    Write,
    /// Address outside the storage area
    OutOfRange,
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StorageError::Read => f.write_str("storage read failed"),
            StorageError::Write => f.write_str("storage write failed"),
            StorageError::OutOfRange => f.write_str("storage address out of range"),
        }
    }
}

/// Byte-addressed persistent storage
///
/// Implementations must tolerate never-written addresses: reading one
/// returns whatever the erased medium holds (typically 0xFF) rather than
/// an error.
pub trait ByteStorage {
    /// Read the byte stored at `address`
    fn read_byte(
        &mut self,
        address: u16,
    ) -> impl core::future::Future<Output = Result<u8, StorageError>>;

    /// Store `value` at `address`
    fn write_byte(
        &mut self,
        address: u16,
        value: u8,
    ) -> impl core::future::Future<Output = Result<(), StorageError>>;
}

impl<T: ByteStorage + ?Sized> ByteStorage for &mut T {
    async fn read_byte(&mut self, address: u16) -> Result<u8, StorageError> {
        (**self).read_byte(address).await
    }

    async fn write_byte(&mut self, address: u16, value: u8) -> Result<(), StorageError> {
        (**self).write_byte(address, value).await
    }
}

/// Volatile storage backed by an array
///
/// Starts out "erased" (all 0xFF) like fresh flash. Useful on the host and
/// as a stand-in when no persistent medium is wired up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RamStorage<const N: usize> {
    bytes: [u8; N],
}

impl<const N: usize> Default for RamStorage<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RamStorage<N> {
    /// Value of a never-written byte
    pub const ERASED: u8 = 0xFF;

    pub const fn new() -> Self {
        Self {
            bytes: [Self::ERASED; N],
        }
    }

    /// Raw contents, for inspection
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl<const N: usize> ByteStorage for RamStorage<N> {
    async fn read_byte(&mut self, address: u16) -> Result<u8, StorageError> {
        self.bytes
            .get(usize::from(address))
            .copied()
            .ok_or(StorageError::OutOfRange)
    }

    async fn write_byte(&mut self, address: u16, value: u8) -> Result<(), StorageError> {
        let slot = self
            .bytes
            .get_mut(usize::from(address))
            .ok_or(StorageError::OutOfRange)?;
        *slot = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;

    #[test]
    fn test_ram_storage_starts_erased() {
        let mut storage = RamStorage::<4>::new();
        assert_eq!(block_on(storage.read_byte(0)), Ok(0xFF));
    }

    #[test]
    fn test_ram_storage_roundtrip() {
        let mut storage = RamStorage::<4>::new();
        block_on(storage.write_byte(3, 7)).unwrap();
        assert_eq!(block_on(storage.read_byte(3)), Ok(7));
        assert_eq!(storage.as_bytes(), &[0xFF, 0xFF, 0xFF, 7]);
    }

    #[test]
    fn test_ram_storage_out_of_range() {
        let mut storage = RamStorage::<4>::new();
        assert_eq!(block_on(storage.read_byte(4)), Err(StorageError::OutOfRange));
        assert_eq!(
            block_on(storage.write_byte(4, 1)),
            Err(StorageError::OutOfRange)
        );
    }

    #[test]
    fn test_mut_ref_forwards() {
        async fn write_through<S: ByteStorage>(mut storage: S) -> Result<(), StorageError> {
            storage.write_byte(1, 9).await
        }

        let mut storage = RamStorage::<2>::new();
        block_on(write_through(&mut storage)).unwrap();
        assert_eq!(block_on(storage.read_byte(1)), Ok(9));
    }
}
