// Thu Jan 16 2026 - Alex

use crate::accessor::Storage;
use crate::memory::{AccessError, Address, Length, RegisterContext, Result};
use std::sync::Arc;

/// One named register of the current execution context.
///
/// Only offset 0 is addressable. Reads narrower than the register return its
/// low bytes; narrower writes replace the low bytes and keep the rest.
/// Registers have no sub-addressing, so nested and external copies are rejected.
pub(crate) struct RegisterStorage {
    context: Arc<dyn RegisterContext>,
    name: String,
    width: usize,
}

impl RegisterStorage {
    pub fn new(context: Arc<dyn RegisterContext>, name: &str) -> Result<Self> {
        let width = context
            .register_width(name)
            .ok_or_else(|| AccessError::UnknownRegister(name.to_string()))?;
        Ok(Self {
            context,
            name: name.to_lowercase(),
            width,
        })
    }

    pub fn length(&self) -> usize {
        self.width
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> String {
        format!("@{}", self.name)
    }

    pub fn read(&self, pos: usize, out: &mut [u8]) -> Result<()> {
        self.check(pos, out.len())?;
        let value = self.context.read_register(&self.name)?;
        let low = value.get(..out.len()).ok_or_else(|| {
            AccessError::unavailable(Address::zero(), format!("short read of register {}", self.name))
        })?;
        out.copy_from_slice(low);
        Ok(())
    }

    pub fn write(&self, pos: usize, data: &[u8]) -> Result<()> {
        self.check(pos, data.len())?;
        if data.len() == self.width {
            return self.context.write_register(&self.name, data);
        }
        let mut value = self.context.read_register(&self.name)?;
        if value.len() != self.width {
            return Err(AccessError::unavailable(
                Address::zero(),
                format!("register {} changed width", self.name),
            ));
        }
        value[..data.len()].copy_from_slice(data);
        log::trace!("partial write of {} byte(s) into {}", data.len(), self.name);
        self.context.write_register(&self.name, &value)
    }

    pub fn nested(&self, _offset: usize, _length: Length) -> Result<Storage> {
        Err(AccessError::unsupported(format!("nested copy of register {}", self.name)))
    }

    pub fn external(&self, _address: Address, _length: usize) -> Result<Storage> {
        Err(AccessError::unsupported(format!("external copy of register {}", self.name)))
    }

    pub fn check_range(&self, start: Address, length: usize) -> bool {
        start.is_null() && length <= self.width
    }

    fn check(&self, pos: usize, len: usize) -> Result<()> {
        if pos != 0 || len > self.width {
            return Err(AccessError::out_of_range(pos as u64, len as u64, self.width as u64));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::accessor::register_accessor;
    use crate::memory::{AccessError, Address, Length, RegisterContext, RegisterFile};
    use std::sync::Arc;

    fn regs() -> Arc<RegisterFile> {
        let regs = Arc::new(RegisterFile::x86_64());
        regs.set_value("rcx", 0x1122334455667788).unwrap();
        regs
    }

    #[test]
    fn test_unknown_register() {
        let err = register_accessor(regs(), "zmm31").unwrap_err();
        assert_eq!(err, AccessError::UnknownRegister("zmm31".to_string()));
    }

    #[test]
    fn test_length_is_register_width() {
        let regs = regs();
        assert_eq!(register_accessor(regs.clone(), "rcx").unwrap().length(), 8);
        assert_eq!(register_accessor(regs, "ss").unwrap().length(), 2);
    }

    #[test]
    fn test_narrow_reads_return_low_bytes() {
        let acc = register_accessor(regs(), "RCX").unwrap();
        assert_eq!(acc.read_qword(0).unwrap(), 0x1122334455667788);
        assert_eq!(acc.read_dword(0).unwrap(), 0x55667788);
        assert_eq!(acc.read_byte(0).unwrap(), 0x88);
        assert_eq!(acc.location(), "@rcx");
    }

    #[test]
    fn test_offset_or_wide_reads_fail() {
        let regs = regs();
        let acc = register_accessor(regs.clone(), "rcx").unwrap();
        assert!(matches!(acc.read_dword(4), Err(AccessError::OutOfRange { .. })));
        let seg = register_accessor(regs, "cs").unwrap();
        assert!(matches!(seg.read_dword(0), Err(AccessError::OutOfRange { .. })));
    }

    #[test]
    fn test_narrow_write_preserves_high_bytes() {
        let regs = regs();
        let acc = register_accessor(regs.clone(), "rcx").unwrap();
        acc.write_word(0xabcd, 0).unwrap();
        assert_eq!(acc.read_qword(0).unwrap(), 0x112233445566abcd);
        assert_eq!(
            regs.read_register("rcx").unwrap(),
            0x112233445566abcdu64.to_le_bytes().to_vec()
        );
    }

    #[test]
    fn test_copies_are_unsupported() {
        let acc = register_accessor(regs(), "rcx").unwrap();
        assert!(matches!(
            acc.nested_copy(0, Length::Rest),
            Err(AccessError::UnsupportedOperation(_))
        ));
        assert!(matches!(
            acc.external_copy(Address::zero(), Length::Rest),
            Err(AccessError::UnsupportedOperation(_))
        ));
    }

    #[test]
    fn test_check_range() {
        let acc = register_accessor(regs(), "rcx").unwrap();
        assert!(acc.check_range(Address::zero(), 8));
        assert!(acc.check_range(Address::zero(), 4));
        assert!(!acc.check_range(Address::zero(), 9));
        assert!(!acc.check_range(Address::new(4), 4));
    }

    #[test]
    fn test_dead_context() {
        let regs = regs();
        let acc = register_accessor(regs.clone(), "rcx").unwrap();
        regs.invalidate();
        assert!(matches!(acc.read_qword(0), Err(AccessError::TargetUnavailable { .. })));
    }
}
