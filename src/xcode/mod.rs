//! The generated Xcode project model.
//!
//! This is the output side of the crate: references and groups, build
//! targets with dependency links and build settings, and the pbxproj
//! writer that puts the assembled model on disk. Everything here is
//! passive data addressed by allocated object identifiers; the generator
//! in [`crate::generator`] is what fills it in.

pub mod id;
pub mod model;
pub mod pbxproj;

pub use id::{IdAllocator, ObjectId};
pub use model::{
    settings_keys, BuildFile, BuildSettings, BuildSettingsTable, FileRef, FrameworksBuildPhase,
    Group, ProductType, Project, RefArena, Reference, SettingValue, SourcesBuildPhase, Target,
    TargetDependency,
};
