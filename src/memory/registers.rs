// Wed Jan 15 2026 - Alex

use crate::memory::{AccessError, Address, RegisterContext, Result};
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

const X86_64_REGISTERS: &[(&str, usize)] = &[
    ("rax", 8), ("rbx", 8), ("rcx", 8), ("rdx", 8),
    ("rsi", 8), ("rdi", 8), ("rbp", 8), ("rsp", 8),
    ("r8", 8), ("r9", 8), ("r10", 8), ("r11", 8),
    ("r12", 8), ("r13", 8), ("r14", 8), ("r15", 8),
    ("rip", 8), ("rflags", 8),
    ("cs", 2), ("ds", 2), ("es", 2), ("fs", 2), ("gs", 2), ("ss", 2),
    ("xmm0", 16), ("xmm1", 16), ("xmm2", 16), ("xmm3", 16),
];

/// In-process register set standing in for a thread's execution context.
///
/// Names are case-insensitive. Every register is independent storage; no
/// sub-register aliasing (`eax` inside `rax`) is modelled.
pub struct RegisterFile {
    registers: RwLock<IndexMap<String, Vec<u8>>>,
    alive: AtomicBool,
}

impl RegisterFile {
    pub fn new() -> Self {
        Self {
            registers: RwLock::new(IndexMap::new()),
            alive: AtomicBool::new(true),
        }
    }

    pub fn x86_64() -> Self {
        X86_64_REGISTERS
            .iter()
            .fold(Self::new(), |file, (name, width)| file.with_register(name, *width))
    }

    pub fn with_register(self, name: &str, width: usize) -> Self {
        self.registers.write().insert(name.to_lowercase(), vec![0u8; width]);
        self
    }

    pub fn set_value(&self, name: &str, value: u64) -> Result<()> {
        let mut registers = self.registers.write();
        let slot = registers
            .get_mut(&name.to_lowercase())
            .ok_or_else(|| AccessError::UnknownRegister(name.to_string()))?;
        let raw = value.to_le_bytes();
        let n = slot.len().min(raw.len());
        slot.iter_mut().for_each(|b| *b = 0);
        slot[..n].copy_from_slice(&raw[..n]);
        Ok(())
    }

    pub fn names(&self) -> Vec<String> {
        self.registers.read().keys().cloned().collect()
    }

    /// Marks the context as gone; every later transfer fails with `TargetUnavailable`.
    pub fn invalidate(&self) {
        self.alive.store(false, Ordering::Release);
    }

    fn ensure_alive(&self, name: &str) -> Result<()> {
        if self.alive.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(AccessError::unavailable(
                Address::zero(),
                format!("execution context gone (register {})", name),
            ))
        }
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterContext for RegisterFile {
    fn register_width(&self, name: &str) -> Option<usize> {
        self.registers.read().get(&name.to_lowercase()).map(Vec::len)
    }

    fn read_register(&self, name: &str) -> Result<Vec<u8>> {
        self.ensure_alive(name)?;
        self.registers
            .read()
            .get(&name.to_lowercase())
            .cloned()
            .ok_or_else(|| AccessError::UnknownRegister(name.to_string()))
    }

    fn write_register(&self, name: &str, value: &[u8]) -> Result<()> {
        self.ensure_alive(name)?;
        let mut registers = self.registers.write();
        let slot = registers
            .get_mut(&name.to_lowercase())
            .ok_or_else(|| AccessError::UnknownRegister(name.to_string()))?;
        if slot.len() != value.len() {
            return Err(AccessError::unsupported(format!(
                "register {} is {} bytes wide, got {}",
                name,
                slot.len(),
                value.len()
            )));
        }
        slot.copy_from_slice(value);
        Ok(())
    }
}
