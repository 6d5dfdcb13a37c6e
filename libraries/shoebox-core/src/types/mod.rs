mod import_info;
mod metadata;
mod photo;
mod roll;
mod tag;
mod thumbnail;

pub use import_info::{
    FileImportInfo, VersionInfo, LABEL_ORIGINAL, LABEL_ORIGINAL_JPEG, LABEL_ORIGINAL_RAW,
};
pub use metadata::{EmbeddedMetadata, MAX_RATING};
pub use photo::{Photo, PhotoId, PhotoVersion};
pub use roll::{Roll, RollId};
pub use tag::{Tag, TagId};
pub use thumbnail::ThumbnailSize;
