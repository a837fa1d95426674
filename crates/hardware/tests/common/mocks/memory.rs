use mockall::mock;
use rvsim_ext::common::{AccessType, MemWidth, Trap};
use rvsim_ext::soc::Memory;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Flat little-endian RAM at `base`, shareable between harts.
pub struct MockMemory {
    data: Mutex<Vec<u8>>,
    base: u64,
    loads: AtomicUsize,
    stores: AtomicUsize,
}

impl MockMemory {
    pub fn new(size: usize, base: u64) -> Self {
        Self {
            data: Mutex::new(vec![0; size]),
            base,
            loads: AtomicUsize::new(0),
            stores: AtomicUsize::new(0),
        }
    }

    /// Writes consecutive 32-bit words starting at `addr`.
    pub fn load_words(&self, addr: u64, words: &[u32]) {
        for (i, word) in words.iter().enumerate() {
            self.write_bytes(addr + 4 * i as u64, &word.to_le_bytes());
        }
    }

    /// Writes one 16-bit parcel at `addr`.
    pub fn write_parcel(&self, addr: u64, parcel: u16) {
        self.write_bytes(addr, &parcel.to_le_bytes());
    }

    pub fn write_bytes(&self, addr: u64, bytes: &[u8]) {
        let offset = (addr - self.base) as usize;
        let mut data = self.data.lock().unwrap();
        data[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    /// Number of data loads served (fetches excluded).
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    /// Number of stores served.
    pub fn stores(&self) -> usize {
        self.stores.load(Ordering::Relaxed)
    }

    fn offset(&self, addr: u64, width: MemWidth, access: AccessType) -> Result<usize, Trap> {
        if addr % width.bytes() != 0 {
            return Err(access.misaligned(addr));
        }
        let len = self.data.lock().unwrap().len() as u64;
        match addr.checked_sub(self.base) {
            Some(offset) if offset + width.bytes() <= len => Ok(offset as usize),
            _ => Err(access.access_fault(addr)),
        }
    }
}

impl Memory for MockMemory {
    fn load(&self, addr: u64, width: MemWidth, access: AccessType) -> Result<u64, Trap> {
        let offset = self.offset(addr, width, access)?;
        if access != AccessType::Fetch {
            let _ = self.loads.fetch_add(1, Ordering::Relaxed);
        }
        let data = self.data.lock().unwrap();
        let mut bytes = [0u8; 8];
        let n = width.bytes() as usize;
        bytes[..n].copy_from_slice(&data[offset..offset + n]);
        Ok(u64::from_le_bytes(bytes))
    }

    fn store(&self, addr: u64, width: MemWidth, value: u64) -> Result<(), Trap> {
        let offset = self.offset(addr, width, AccessType::Write)?;
        let _ = self.stores.fetch_add(1, Ordering::Relaxed);
        let n = width.bytes() as usize;
        let bytes = (value & width.mask()).to_le_bytes();
        self.data.lock().unwrap()[offset..offset + n].copy_from_slice(&bytes[..n]);
        Ok(())
    }
}

mock! {
    pub MemoryPort {}
    impl Memory for MemoryPort {
        fn load(&self, addr: u64, width: MemWidth, access: AccessType) -> Result<u64, Trap>;
        fn store(&self, addr: u64, width: MemWidth, value: u64) -> Result<(), Trap>;
        fn fetch_parcel(&self, addr: u64) -> Result<u16, Trap>;
    }
}
