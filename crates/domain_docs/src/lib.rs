//! Document domain - cargo manifests and draft MAWBs
//!
//! Each master air waybill owns at most one cargo manifest and one draft
//! MAWB. Both documents are written header-plus-children as a unit and move
//! through a guarded status workflow after creation.

pub mod draft_mawb;
pub mod error;
pub mod manifest;
pub mod status;

pub use draft_mawb::{
    DraftCharge, DraftItem, DraftMawb, ItemDimension, NewDraftCharge, NewDraftItem, NewDraftMawb,
};
pub use error::DocumentError;
pub use manifest::{CargoManifest, ManifestItem, NewManifest, NewManifestItem};
pub use status::DocumentStatus;
