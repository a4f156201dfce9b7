// pt-core/src/units.rs

use uom::si::f64::{Pressure as UomPressure, Time as UomTime};
use uom::si::pressure::megapascal;
use uom::si::time::millisecond;

// Curves are exchanged in MPa over ms; these keep the unit at the edge.
pub type Pressure = UomPressure;
pub type Time = UomTime;

#[inline]
pub fn mpa(v: f64) -> Pressure {
    Pressure::new::<megapascal>(v)
}

#[inline]
pub fn ms(v: f64) -> Time {
    Time::new::<millisecond>(v)
}

#[inline]
pub fn to_mpa(p: Pressure) -> f64 {
    p.get::<megapascal>()
}

#[inline]
pub fn to_ms(t: Time) -> f64 {
    t.get::<millisecond>()
}
