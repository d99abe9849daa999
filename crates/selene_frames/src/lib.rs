//! Frame conversion helpers for the selene workspace.
//!
//! Provides 3×3 rotations, mean obliquity, IAU 2006 precession, truncated
//! IAU 2000B nutation, Cartesian ↔ spherical conversion and the horizon
//! system (altitude/azimuth, refraction, angular separation).

pub mod angle;
pub mod horizon;
pub mod nutation;
pub mod precession;
pub mod rotation;
pub mod spherical;

pub use angle::{normalize_180, normalize_360};
pub use horizon::{
    Atmosphere, Horizontal, angular_separation_deg, equatorial_to_horizontal, refraction_deg,
};
pub use nutation::{Nutation, fundamental_arguments, nutation_iau2000b};
pub use precession::precession_matrix;
pub use rotation::{
    Mat3, ecliptic_of_date_to_equatorial, equatorial_to_ecliptic_of_date,
    mean_obliquity_rad,
};
pub use spherical::{SphericalCoords, cartesian_to_spherical, spherical_to_cartesian};
