//! Truncated IAU 2000B nutation (largest lunisolar terms).
//!
//! The diurnal engine only needs nutation for the equation of the
//! equinoxes and apparent positions at arcsecond level, so the series is
//! cut to the 13 terms with amplitude above 0.01″ in Δψ. Truncation error
//! is below ~0.05″ in both components.
//!
//! Source: IERS Conventions 2010, Table 5.3b; fundamental arguments from
//! Table 5.2e. Public domain (IAU standard).

use std::f64::consts::TAU;

/// Arcseconds to radians.
const AS2RAD: f64 = TAU / 1_296_000.0;

/// Nutation in longitude and obliquity, radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nutation {
    /// Δψ, nutation in longitude.
    pub dpsi_rad: f64,
    /// Δε, nutation in obliquity.
    pub deps_rad: f64,
}

/// Delaunay arguments `[l, l', F, D, Ω]` in radians for `t` Julian
/// centuries since J2000.0.
pub fn fundamental_arguments(t: f64) -> [f64; 5] {
    let poly = |c: [f64; 5]| (c[0] + t * (c[1] + t * (c[2] + t * (c[3] + t * c[4])))) * AS2RAD;
    [
        poly([485868.249036, 1717915923.2178, 31.8792, 0.051635, -0.00024470]),
        poly([1287104.79305, 129596581.0481, -0.5532, 0.000136, -0.00001149]),
        poly([335779.526232, 1739527262.8478, -12.7512, -0.001037, 0.00000417]),
        poly([1072260.70369, 1602961601.2090, -6.3706, 0.006593, -0.00003169]),
        poly([450160.398036, -6962890.5431, 7.4722, 0.007702, -0.00005939]),
    ]
}

/// Rows: `[nl, nl', nF, nD, nΩ, S, S', C, C']`, amplitudes in 0.1 μas.
#[rustfmt::skip]
const TERMS: [[i64; 9]; 13] = [
    [ 0,  0,  0,  0,  1, -172064161, -174666, 92052331,  9086],
    [ 0,  0,  2, -2,  2,  -13170906,   -1675,  5730336, -3015],
    [ 0,  0,  2,  0,  2,   -2276413,    -234,   978459,  -485],
    [ 0,  0,  0,  0,  2,    2074554,     207,  -897492,   470],
    [ 0,  1,  0,  0,  0,    1475877,   -3633,    73871,  -184],
    [ 0,  1,  2, -2,  2,    -516821,    1226,   224386,  -677],
    [ 1,  0,  0,  0,  0,     711159,      73,    -6750,     0],
    [ 0,  0,  2,  0,  1,    -387298,    -367,   200728,    18],
    [ 1,  0,  2,  0,  2,    -301461,     -36,   129025,   -63],
    [ 0, -1,  2, -2,  2,     215829,    -494,   -95929,   299],
    [ 0,  0,  2, -2,  1,     128227,     137,   -68982,    -9],
    [-1,  0,  2,  0,  2,     123457,      11,   -53311,    32],
    [-1,  0,  0,  2,  0,     156994,      10,    -1235,     0],
];

/// Nutation at `t` Julian centuries since J2000.0.
pub fn nutation(t: f64) -> Nutation {
    let args = fundamental_arguments(t);
    let (mut dpsi, mut deps) = (0.0_f64, 0.0_f64);
    for row in &TERMS {
        let arg: f64 = row[..5]
            .iter()
            .zip(args.iter())
            .map(|(&n, &a)| n as f64 * a)
            .sum();
        let (sin_arg, cos_arg) = arg.sin_cos();
        dpsi += (row[5] as f64 + row[6] as f64 * t) * sin_arg;
        deps += (row[7] as f64 + row[8] as f64 * t) * cos_arg;
    }
    Nutation {
        dpsi_rad: dpsi * 1e-7 * AS2RAD,
        deps_rad: deps * 1e-7 * AS2RAD,
    }
}
