// SPDX-License-Identifier: Apache-2.0

//! Wrappers around the C API exported by an externally compiled simulation
//! model shared object.

use libloading::{Library, Symbol};
use once_cell::sync::OnceCell;
use std::ffi::CString;
use std::path::{Path, PathBuf};

use crate::tickbench_error::TickbenchError;

extern crate libc;
extern crate libloading;

static MODEL_LIBRARY: OnceCell<ModelLibrary> = OnceCell::new();

#[repr(C)]
pub(crate) struct CModel {
    _private: [u8; 0], // Ensures the struct cannot be instantiated
}

pub(crate) type ModelNew = unsafe extern "C" fn() -> *mut CModel;
pub(crate) type ModelFree = unsafe extern "C" fn(model: *mut CModel);
pub(crate) type ModelSetSignal = unsafe extern "C" fn(model: *mut CModel, value: u8);
pub(crate) type ModelGetClk = unsafe extern "C" fn(model: *const CModel) -> u8;
pub(crate) type ModelEval = unsafe extern "C" fn(model: *mut CModel);
pub(crate) type ModelReadOutput = unsafe extern "C" fn(model: *const CModel) -> u32;
pub(crate) type ModelCommandArgs =
    unsafe extern "C" fn(argc: libc::c_int, argv: *const *const std::os::raw::c_char);

/// A loaded model library with every entry point resolved up front, so the
/// timed loop calls through plain function pointers.
pub struct ModelLibrary {
    path: PathBuf,
    new: ModelNew,
    free: ModelFree,
    set_clk: ModelSetSignal,
    get_clk: ModelGetClk,
    set_rst: ModelSetSignal,
    eval: ModelEval,
    read_output: ModelReadOutput,
    command_args: Option<ModelCommandArgs>,
    // Keeps the function pointers above valid; never unloaded.
    _library: Library,
}

impl std::fmt::Debug for ModelLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelLibrary")
            .field("path", &self.path)
            .field("has_command_args", &self.command_args.is_some())
            .finish()
    }
}

fn resolve<T: Copy>(lib: &Library, name: &str) -> Result<T, TickbenchError> {
    unsafe {
        let sym: Symbol<T> = match lib.get(name.as_bytes()) {
            Ok(f) => f,
            Err(e) => {
                return Err(TickbenchError(format!(
                    "Failed to load symbol `{}`: {}",
                    name, e
                )))
            }
        };
        Ok(*sym)
    }
}

fn open_model_library(path: &Path) -> Result<ModelLibrary, TickbenchError> {
    log::info!("loading simulation model from: {}", path.display());
    let library = unsafe {
        match Library::new(path) {
            Ok(l) => l,
            Err(e) => {
                return Err(TickbenchError(format!(
                    "Failed to load model library {}: {}",
                    path.display(),
                    e
                )))
            }
        }
    };
    let command_args =
        resolve::<ModelCommandArgs>(&library, "tickbench_model_command_args").ok();
    if command_args.is_none() {
        log::debug!("model library exports no argument parser");
    }
    Ok(ModelLibrary {
        path: path.to_path_buf(),
        new: resolve(&library, "tickbench_model_new")?,
        free: resolve(&library, "tickbench_model_free")?,
        set_clk: resolve(&library, "tickbench_model_set_clk")?,
        get_clk: resolve(&library, "tickbench_model_get_clk")?,
        set_rst: resolve(&library, "tickbench_model_set_rst")?,
        eval: resolve(&library, "tickbench_model_eval")?,
        read_output: resolve(&library, "tickbench_model_read_output")?,
        command_args,
        _library: library,
    })
}

/// Converts process arguments into NUL-terminated strings, preserving order.
pub fn to_c_argv(args: &[String]) -> Result<Vec<CString>, TickbenchError> {
    let mut c_args = Vec::with_capacity(args.len());
    for arg in args {
        match CString::new(arg.as_str()) {
            Ok(s) => c_args.push(s),
            Err(_) => {
                return Err(TickbenchError(format!(
                    "argument contains an interior NUL byte: {:?}",
                    arg
                )))
            }
        }
    }
    Ok(c_args)
}

/// Loads the model library at `path`, once per process.
///
/// Asking for a different path after a library has been loaded is an error.
pub fn load_model_library(path: &Path) -> Result<&'static ModelLibrary, TickbenchError> {
    let lib = MODEL_LIBRARY.get_or_try_init(|| open_model_library(path))?;
    if lib.path() != path {
        return Err(TickbenchError(format!(
            "model library {} already loaded; cannot load {}",
            lib.path().display(),
            path.display()
        )));
    }
    Ok(lib)
}

impl ModelLibrary {
    /// Builds a library over in-process entry points, for exercising the C
    /// API without a compiled model.
    #[cfg(all(test, unix))]
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        path: &Path,
        new: ModelNew,
        free: ModelFree,
        set_clk: ModelSetSignal,
        get_clk: ModelGetClk,
        set_rst: ModelSetSignal,
        eval: ModelEval,
        read_output: ModelReadOutput,
        command_args: Option<ModelCommandArgs>,
    ) -> Self {
        ModelLibrary {
            path: path.to_path_buf(),
            new,
            free,
            set_clk,
            get_clk,
            set_rst,
            eval,
            read_output,
            command_args,
            _library: Library::from(libloading::os::unix::Library::this()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Hands the raw process arguments to the model's own argument parser,
    /// if it exports one.
    pub fn command_args(&self, args: &[String]) -> Result<(), TickbenchError> {
        let f = match self.command_args {
            Some(f) => f,
            None => return Ok(()),
        };
        let c_args = to_c_argv(args)?;
        let argv: Vec<*const std::os::raw::c_char> =
            c_args.iter().map(|s| s.as_ptr()).collect();
        let argc = match libc::c_int::try_from(argv.len()) {
            Ok(n) => n,
            Err(_) => return Err(TickbenchError("too many arguments".to_string())),
        };
        unsafe {
            f(argc, argv.as_ptr());
        }
        Ok(())
    }

    pub(crate) fn model_new(&self) -> Result<*mut CModel, TickbenchError> {
        let p = unsafe { (self.new)() };
        if p.is_null() {
            return Err(TickbenchError(
                "tickbench_model_new returned a null model".to_string(),
            ));
        }
        Ok(p)
    }

    /// # Safety
    ///
    /// `p` must come from `model_new` on this library and not yet be freed.
    pub(crate) unsafe fn model_free(&self, p: *mut CModel) {
        (self.free)(p)
    }

    /// # Safety
    ///
    /// See `model_free`.
    #[inline]
    pub(crate) unsafe fn set_clk(&self, p: *mut CModel, high: bool) {
        (self.set_clk)(p, high as u8)
    }

    /// # Safety
    ///
    /// See `model_free`.
    #[inline]
    pub(crate) unsafe fn get_clk(&self, p: *const CModel) -> bool {
        (self.get_clk)(p) != 0
    }

    /// # Safety
    ///
    /// See `model_free`.
    #[inline]
    pub(crate) unsafe fn set_rst(&self, p: *mut CModel, asserted: bool) {
        (self.set_rst)(p, asserted as u8)
    }

    /// # Safety
    ///
    /// See `model_free`.
    #[inline]
    pub(crate) unsafe fn eval(&self, p: *mut CModel) {
        (self.eval)(p)
    }

    /// # Safety
    ///
    /// See `model_free`.
    #[inline]
    pub(crate) unsafe fn read_output(&self, p: *const CModel) -> u32 {
        (self.read_output)(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;
    use std::sync::Mutex;

    #[test]
    fn test_open_missing_library() {
        let e = open_model_library(Path::new("/does/not/exist/libmodel.so"))
            .expect_err("should not load");
        assert!(
            e.0.starts_with("Failed to load model library /does/not/exist/libmodel.so"),
            "unexpected error: {}",
            e
        );
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_library_without_model_symbols() {
        let e = open_model_library(Path::new("libc.so.6"))
            .expect_err("libc exports no model entry points");
        assert!(
            e.0.starts_with("Failed to load symbol `tickbench_model_new`"),
            "unexpected error: {}",
            e
        );
    }

    #[test]
    fn test_to_c_argv_preserves_order() {
        let args: Vec<String> = vec!["tickbench".into(), "+verilator+seed+7".into(), "".into()];
        let c_args = to_c_argv(&args).expect("plain arguments convert");
        let back: Vec<&str> = c_args.iter().map(|s| s.to_str().unwrap()).collect();
        assert_eq!(back, vec!["tickbench", "+verilator+seed+7", ""]);
    }

    #[test]
    fn test_to_c_argv_rejects_interior_nul() {
        let args: Vec<String> = vec!["tickbench".into(), "bad\0arg".into()];
        let e = to_c_argv(&args).expect_err("interior NUL should be rejected");
        assert_eq!(e.0, "argument contains an interior NUL byte: \"bad\\0arg\"");
    }

    #[cfg(unix)]
    mod forwarding {
        use super::*;

        static SEEN_ARGS: Mutex<Vec<String>> = Mutex::new(Vec::new());

        unsafe extern "C" fn no_model() -> *mut CModel {
            std::ptr::null_mut()
        }
        unsafe extern "C" fn ignore_model(_: *mut CModel) {}
        unsafe extern "C" fn ignore_signal(_: *mut CModel, _: u8) {}
        unsafe extern "C" fn low_clk(_: *const CModel) -> u8 {
            0
        }
        unsafe extern "C" fn zero_output(_: *const CModel) -> u32 {
            0
        }
        unsafe extern "C" fn record_args(
            argc: libc::c_int,
            argv: *const *const std::os::raw::c_char,
        ) {
            let mut seen = SEEN_ARGS.lock().unwrap();
            for i in 0..argc as usize {
                let arg = CStr::from_ptr(*argv.add(i));
                seen.push(arg.to_str().unwrap().to_string());
            }
        }

        fn library(command_args: Option<ModelCommandArgs>) -> ModelLibrary {
            ModelLibrary::from_parts(
                Path::new("libforwarding.so"),
                no_model,
                ignore_model,
                ignore_signal,
                low_clk,
                ignore_signal,
                ignore_model,
                zero_output,
                command_args,
            )
        }

        #[test]
        fn test_command_args_reach_model_unmodified() {
            let lib = library(Some(record_args));
            let args: Vec<String> = vec!["tickbench".into(), "+trace".into(), "-x 1".into()];
            lib.command_args(&args).expect("forwarding should succeed");
            assert_eq!(*SEEN_ARGS.lock().unwrap(), args);
            assert_eq!(lib.path(), Path::new("libforwarding.so"));
        }

        #[test]
        fn test_command_args_without_parser() {
            let lib = library(None);
            let args: Vec<String> = vec!["tickbench".into(), "bad\0arg".into()];
            // Nothing is marshalled when the model has no parser.
            lib.command_args(&args).expect("no parser is not an error");
        }

        #[test]
        fn test_command_args_interior_nul() {
            let lib = library(Some(record_args));
            let args: Vec<String> = vec!["bad\0arg".into()];
            assert!(lib.command_args(&args).is_err());
        }
    }
}
