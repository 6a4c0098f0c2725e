//! Windows implementation of the non-executing image loader.
//!
//! Modules are mapped with `LoadLibraryExA` and `DONT_RESOLVE_DLL_REFERENCES`
//! so the image's entry point never runs and its imports are left unresolved.
//! Exports go through `GetProcAddress`; image bytes are copied out of the
//! current process with `ReadProcessMemory`.

use std::ffi::{CString, c_void};

use windows::Win32::Foundation::HMODULE;
use windows::Win32::System::Diagnostics::Debug::ReadProcessMemory;
use windows::Win32::System::LibraryLoader::{
    DONT_RESOLVE_DLL_REFERENCES, FreeLibrary, GetProcAddress, LoadLibraryExA,
};
use windows::Win32::System::ProcessStatus::{GetModuleInformation, MODULEINFO};
use windows::Win32::System::Threading::GetCurrentProcess;
use windows::core::PCSTR;

use super::{ImageLoader, LoadedImage};
use crate::error::{Error, Result};

/// Loader backed by the platform loader in non-executing mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLoader;

/// A module mapped for inspection. `Drop` releases the mapping.
#[derive(Debug)]
pub struct DataImage {
    module: HMODULE,
    base: usize,
    size: usize,
}

impl ImageLoader for SystemLoader {
    type Image = DataImage;

    fn load(&self, name: &str) -> Result<DataImage> {
        let c_name = CString::new(name)
            .map_err(|_| Error::LoadFailed(format!("module name contains a NUL byte: {name:?}")))?;

        let module = unsafe {
            LoadLibraryExA(
                PCSTR(c_name.as_ptr().cast()),
                None,
                DONT_RESOLVE_DLL_REFERENCES,
            )
        }
        .map_err(|e| Error::LoadFailed(format!("{name}: {e}")))?;

        let mut info = MODULEINFO::default();
        if let Err(e) = unsafe {
            GetModuleInformation(
                GetCurrentProcess(),
                module,
                &mut info,
                std::mem::size_of::<MODULEINFO>() as u32,
            )
        } {
            let _ = unsafe { FreeLibrary(module) };
            return Err(Error::LoadFailed(format!("{name}: {e}")));
        }

        Ok(DataImage {
            module,
            base: info.lpBaseOfDll as usize,
            size: info.SizeOfImage as usize,
        })
    }
}

impl LoadedImage for DataImage {
    fn size(&self) -> usize {
        self.size
    }

    fn export_offset(&self, symbol: &str) -> Result<u64> {
        let c_symbol = CString::new(symbol).map_err(|_| {
            Error::NotFound(format!("symbol name contains a NUL byte: {symbol:?}"))
        })?;

        let address = unsafe { GetProcAddress(self.module, PCSTR(c_symbol.as_ptr().cast())) }
            .ok_or_else(|| Error::NotFound(format!("no export named {symbol:?}")))?;

        Ok((address as usize - self.base) as u64)
    }

    fn read_bytes(&self, offset: u64, len: usize) -> Result<Vec<u8>> {
        let in_range = offset
            .checked_add(len as u64)
            .is_some_and(|end| end <= self.size as u64);
        if !in_range {
            return Err(Error::ReadFailed {
                offset,
                len,
                message: format!("range exceeds mapped image size {:#x}", self.size),
            });
        }

        let mut buffer = vec![0u8; len];
        let mut bytes_read = 0usize;
        unsafe {
            ReadProcessMemory(
                GetCurrentProcess(),
                (self.base + offset as usize) as *const c_void,
                buffer.as_mut_ptr().cast(),
                len,
                Some(&mut bytes_read),
            )
        }
        .map_err(|e| Error::ReadFailed {
            offset,
            len,
            message: e.to_string(),
        })?;

        if bytes_read != len {
            return Err(Error::ReadFailed {
                offset,
                len,
                message: format!("short read: got {} bytes", bytes_read),
            });
        }

        Ok(buffer)
    }
}

impl Drop for DataImage {
    fn drop(&mut self) {
        let _ = unsafe { FreeLibrary(self.module) };
    }
}
