// tk-core/src/units.rs

use uom::si::f64::{Area as UomArea, Length as UomLength, Volume as UomVolume};

// Public canonical unit types (SI, f64)
pub type Area = UomArea;
pub type Length = UomLength;
pub type Volume = UomVolume;

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn m2(v: f64) -> Area {
    use uom::si::area::square_meter;
    Area::new::<square_meter>(v)
}

#[inline]
pub fn m3(v: f64) -> Volume {
    use uom::si::volume::cubic_meter;
    Volume::new::<cubic_meter>(v)
}

/// Cubic meters held by a `Volume`.
#[inline]
pub fn to_m3(v: Volume) -> f64 {
    use uom::si::volume::cubic_meter;
    v.get::<cubic_meter>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_times_height_is_volume() {
        let v: Volume = m2(1.2) * m(1.0);
        assert!((to_m3(v) - 1.2).abs() < 1e-12);
    }
}
