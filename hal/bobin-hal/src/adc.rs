//! Analog input abstraction
//!
//! The speed potentiometer is the only analog signal on the panel. The
//! reading is opaque: the range depends on the converter (8-bit on the
//! original panel, 10/12-bit elsewhere) and is mapped by the sampler.

/// Single-channel analog reading
pub trait AnalogInput {
    /// Take one raw sample
    fn read_raw(&mut self) -> u16;
}

impl<T: AnalogInput + ?Sized> AnalogInput for &mut T {
    fn read_raw(&mut self) -> u16 {
        (**self).read_raw()
    }
}
