//! OpenStep-plist serialization of the project model.
//!
//! Writes the `project.pbxproj` file Xcode reads. Object addresses are the
//! identifiers allocated during generation; the handful of serializer-only
//! objects (configuration lists, container item proxies) get deterministic
//! keys derived from their owner's identifier, so identical models always
//! serialize to identical bytes.

use std::fmt::Write;

use crate::xcode::model::{
    BuildSettings, Configuration, Project, Reference, SettingValue, Target,
};
use crate::xcode::ObjectId;

/// File name of the serialized project inside the `.xcodeproj` wrapper.
pub const PBXPROJ_NAME: &str = "project.pbxproj";

/// Serialize a project to pbxproj text.
pub fn serialize(project: &Project) -> String {
    let mut out = String::new();
    out.push_str("// !$*UTF8*$!\n");
    out.push_str("{\n");
    out.push_str("   archiveVersion = 1;\n");
    out.push_str("   classes = {\n   };\n");
    out.push_str("   objectVersion = 46;\n");
    out.push_str("   objects = {\n");

    write_project(&mut out, project);
    for reference in project.refs.iter() {
        write_reference(&mut out, project, reference);
    }
    for target in &project.targets {
        write_target(&mut out, project, target);
    }

    out.push_str("   };\n");
    let _ = writeln!(out, "   rootObject = {};", project.id);
    out.push_str("}\n");
    out
}

fn write_project(out: &mut String, project: &Project) {
    begin_object(out, &project.id.to_string(), "PBXProject");
    let _ = writeln!(
        out,
        "         buildConfigurationList = {};",
        confs_key(project.id)
    );
    out.push_str("         compatibilityVersion = \"Xcode 3.2\";\n");
    let _ = writeln!(out, "         mainGroup = {};", project.main_group);
    let _ = writeln!(
        out,
        "         projectDirPath = {};",
        quote(&project.project_dir)
    );
    out.push_str("         targets = (\n");
    for target in &project.targets {
        let _ = writeln!(out, "            {},", target.id);
    }
    out.push_str("         );\n");
    end_object(out);

    write_configuration_list(out, project.id, None, None);
}

fn write_reference(out: &mut String, project: &Project, reference: &Reference) {
    match reference {
        Reference::Group(group) => {
            begin_object(out, &group.id.to_string(), "PBXGroup");
            out.push_str("         children = (\n");
            for child in &group.children {
                let _ = writeln!(out, "            {},", child);
            }
            out.push_str("         );\n");
            if let Some(name) = &group.name {
                let _ = writeln!(out, "         name = {};", quote(name));
            }
            let _ = writeln!(
                out,
                "         path = {};",
                quote(&group.path.to_string_lossy())
            );
            let _ = writeln!(
                out,
                "         sourceTree = {};",
                quote(source_tree(group.path.is_absolute()))
            );
            end_object(out);
        }
        Reference::File(file) => {
            // Product references live in the Products group and carry their
            // type; plain file references are typed by extension in the IDE.
            let product_type = project
                .targets
                .iter()
                .find(|t| t.product_reference == Some(file.id))
                .and_then(|t| t.product_type);

            begin_object(out, &file.id.to_string(), "PBXFileReference");
            if let Some(product_type) = product_type {
                let _ = writeln!(
                    out,
                    "         explicitFileType = {};",
                    quote(product_type.file_type())
                );
            }
            if let Some(name) = &file.name {
                let _ = writeln!(out, "         name = {};", quote(name));
            }
            let _ = writeln!(
                out,
                "         path = {};",
                quote(&file.path.to_string_lossy())
            );
            let tree = if product_type.is_some() {
                "BUILT_PRODUCTS_DIR"
            } else {
                source_tree(file.path.is_absolute())
            };
            let _ = writeln!(out, "         sourceTree = {};", quote(tree));
            end_object(out);
        }
    }
}

fn write_target(out: &mut String, project: &Project, target: &Target) {
    let isa = if target.product_type.is_some() {
        "PBXNativeTarget"
    } else {
        "PBXAggregateTarget"
    };
    begin_object(out, &target.id.to_string(), isa);
    let _ = writeln!(
        out,
        "         buildConfigurationList = {};",
        confs_key(target.id)
    );
    out.push_str("         buildPhases = (\n");
    let _ = writeln!(out, "            {},", target.sources.id);
    let _ = writeln!(out, "            {},", target.frameworks.id);
    out.push_str("         );\n");
    out.push_str("         dependencies = (\n");
    for dep in &target.dependencies {
        let _ = writeln!(out, "            {},", dep.id);
    }
    out.push_str("         );\n");
    let _ = writeln!(out, "         name = {};", quote(&target.name));
    let _ = writeln!(out, "         productName = {};", quote(&target.product_name));
    if let Some(product_reference) = target.product_reference {
        let _ = writeln!(out, "         productReference = {};", product_reference);
    }
    if let Some(product_type) = target.product_type {
        let _ = writeln!(
            out,
            "         productType = {};",
            quote(product_type.identifier())
        );
    }
    end_object(out);

    write_configuration_list(
        out,
        target.id,
        Some(&target.build_settings.merged(Configuration::Debug)),
        Some(&target.build_settings.merged(Configuration::Release)),
    );

    begin_object(out, &target.sources.id.to_string(), "PBXSourcesBuildPhase");
    write_phase_files(out, &target.sources.files);
    end_object(out);
    for file in &target.sources.files {
        write_build_file(out, file.id, file.file_ref);
    }

    begin_object(
        out,
        &target.frameworks.id.to_string(),
        "PBXFrameworksBuildPhase",
    );
    write_phase_files(out, &target.frameworks.files);
    end_object(out);
    for file in &target.frameworks.files {
        write_build_file(out, file.id, file.file_ref);
    }

    for dep in &target.dependencies {
        let remote = project.target_by_id(dep.target);
        begin_object(out, &dep.id.to_string(), "PBXTargetDependency");
        let _ = writeln!(out, "         target = {};", dep.target);
        let _ = writeln!(out, "         targetProxy = {}_PROXY;", dep.id);
        end_object(out);

        begin_object(out, &format!("{}_PROXY", dep.id), "PBXContainerItemProxy");
        let _ = writeln!(out, "         containerPortal = {};", project.id);
        out.push_str("         proxyType = 1;\n");
        let _ = writeln!(out, "         remoteGlobalIDString = {};", dep.target);
        if let Some(remote) = remote {
            let _ = writeln!(out, "         remoteInfo = {};", quote(&remote.name));
        }
        end_object(out);
    }
}

fn write_phase_files(out: &mut String, files: &[crate::xcode::model::BuildFile]) {
    out.push_str("         files = (\n");
    for file in files {
        let _ = writeln!(out, "            {},", file.id);
    }
    out.push_str("         );\n");
}

fn write_build_file(out: &mut String, id: ObjectId, file_ref: ObjectId) {
    begin_object(out, &id.to_string(), "PBXBuildFile");
    let _ = writeln!(out, "         fileRef = {};", file_ref);
    end_object(out);
}

fn write_configuration_list(
    out: &mut String,
    owner: ObjectId,
    debug: Option<&BuildSettings>,
    release: Option<&BuildSettings>,
) {
    begin_object(out, &confs_key(owner), "XCConfigurationList");
    out.push_str("         buildConfigurations = (\n");
    let _ = writeln!(out, "            {}_DBG,", owner);
    let _ = writeln!(out, "            {}_REL,", owner);
    out.push_str("         );\n");
    out.push_str("         defaultConfigurationIsVisible = 0;\n");
    out.push_str("         defaultConfigurationName = Release;\n");
    end_object(out);

    write_configuration(out, &format!("{}_DBG", owner), "Debug", debug);
    write_configuration(out, &format!("{}_REL", owner), "Release", release);
}

fn write_configuration(
    out: &mut String,
    key: &str,
    name: &str,
    settings: Option<&BuildSettings>,
) {
    begin_object(out, key, "XCBuildConfiguration");
    out.push_str("         buildSettings = {\n");
    if let Some(settings) = settings {
        for (key, value) in settings.iter() {
            match value {
                SettingValue::String(s) => {
                    let _ = writeln!(out, "            {} = {};", key, quote(s));
                }
                SettingValue::List(items) => {
                    let _ = writeln!(out, "            {} = (", key);
                    for item in items {
                        let _ = writeln!(out, "               {},", quote(item));
                    }
                    out.push_str("            );\n");
                }
            }
        }
    }
    out.push_str("         };\n");
    let _ = writeln!(out, "         name = {};", name);
    end_object(out);
}

fn begin_object(out: &mut String, key: &str, isa: &str) {
    let _ = writeln!(out, "      {} = {{", key);
    let _ = writeln!(out, "         isa = {};", isa);
}

fn end_object(out: &mut String) {
    out.push_str("      };\n");
}

fn confs_key(owner: ObjectId) -> String {
    format!("{}_CONFS", owner)
}

fn source_tree(absolute: bool) -> &'static str {
    if absolute {
        "<absolute>"
    } else {
        "<group>"
    }
}

/// Quote a value unless it is a plain identifier.
fn quote(s: &str) -> String {
    let plain = !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
    if plain {
        s.to_string()
    } else {
        format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xcode::{IdAllocator, ProductType, RefArena};
    use crate::util::InternedString;

    fn tiny_project() -> Project {
        let mut ids = IdAllocator::new();
        let project_id = ids.next_id();
        let mut refs = RefArena::new();
        let main_group = refs.add_group(&mut ids, None, None, "");
        let file = refs.add_file(&mut ids, main_group, None, "main.swift");

        let mut target = Target::new(
            &mut ids,
            InternedString::new("App"),
            Some(ProductType::Executable),
            "App",
        );
        target.add_source_file(&mut ids, file);
        target
            .build_settings
            .common
            .set("PRODUCT_NAME", "$(TARGET_NAME)");

        Project {
            id: project_id,
            name: "App".to_string(),
            path: "/tmp/App.xcodeproj".into(),
            project_dir: "App".to_string(),
            main_group,
            refs,
            targets: vec![target],
        }
    }

    #[test]
    fn test_serialize_structure() {
        let text = serialize(&tiny_project());

        assert!(text.starts_with("// !$*UTF8*$!"));
        assert!(text.contains("isa = PBXProject;"));
        assert!(text.contains("isa = PBXNativeTarget;"));
        assert!(text.contains("isa = PBXSourcesBuildPhase;"));
        assert!(text.contains("productType = \"com.apple.product-type.tool\";"));
        assert!(text.contains("rootObject = OBJ_1;"));
    }

    #[test]
    fn test_serialize_is_deterministic() {
        let a = serialize(&tiny_project());
        let b = serialize(&tiny_project());
        assert_eq!(a, b);
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote("Sources"), "Sources");
        assert_eq!(quote("main.swift"), "main.swift");
        assert_eq!(quote("$(TARGET_NAME)"), "\"$(TARGET_NAME)\"");
        assert_eq!(quote(""), "\"\"");
    }
}
