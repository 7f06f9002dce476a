// SPDX-License-Identifier: Apache-2.0

use crate::c_api::{CModel, ModelLibrary};
use crate::device::SimulatedDevice;
use crate::tickbench_error::TickbenchError;

/// One model instance created through a loaded model library. The instance is
/// freed when this value is dropped.
pub struct DsoDevice {
    lib: &'static ModelLibrary,
    ptr: *mut CModel,
}

impl DsoDevice {
    pub fn new(lib: &'static ModelLibrary) -> Result<Self, TickbenchError> {
        let ptr = lib.model_new()?;
        Ok(DsoDevice { lib, ptr })
    }
}

impl SimulatedDevice for DsoDevice {
    #[inline]
    fn set_clock(&mut self, high: bool) {
        unsafe { self.lib.set_clk(self.ptr, high) }
    }

    #[inline]
    fn clock(&self) -> bool {
        unsafe { self.lib.get_clk(self.ptr) }
    }

    #[inline]
    fn set_reset(&mut self, asserted: bool) {
        unsafe { self.lib.set_rst(self.ptr, asserted) }
    }

    #[inline]
    fn evaluate(&mut self) {
        unsafe { self.lib.eval(self.ptr) }
    }

    #[inline]
    fn read_output(&self) -> u32 {
        unsafe { self.lib.read_output(self.ptr) }
    }
}

impl Drop for DsoDevice {
    fn drop(&mut self) {
        unsafe { self.lib.model_free(self.ptr) }
    }
}
