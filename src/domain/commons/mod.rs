//! Types shared by several OCPI modules.

pub mod business_details;
pub mod display_text;
pub mod geo;
pub mod ids;
pub mod image;
pub mod price;

pub use business_details::BusinessDetails;
pub use display_text::DisplayText;
pub use geo::{AdditionalGeoLocation, GeoCoordinate};
pub use ids::{CountryCode, PartyId, Url};
pub use image::{Image, ImageCategory};
pub use price::Price;
