use std::fs;
use std::path::{Path, PathBuf};

use model_registrar::models::ModelEntry;
use model_registrar::registry::{register, Registry, RegistryError};
use serde_json::{json, Value};
use speculate2::speculate;

fn write_registry(dir: &Path, file: &str, content: &str) -> PathBuf {
    let path = dir.join(file);
    fs::write(&path, content).expect("Failed to write registry");
    path
}

fn read_json(path: &Path) -> Value {
    let content = fs::read_to_string(path).expect("Failed to read registry");
    serde_json::from_str(&content).expect("Registry is not valid JSON")
}

speculate! {
    before {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
    }

    describe "register" {
        it "appends to an empty registry" {
            let path = write_registry(dir.path(), "models.json", "[]");

            let changed = register("acme/model-7", "Acme Model 7", &[&path]).expect("register failed");

            assert!(changed);
            assert_eq!(read_json(&path), json!([{"id": "acme/model-7", "name": "Acme Model 7"}]));
        }

        it "is idempotent" {
            let path = write_registry(dir.path(), "models.json", "[]");

            assert!(register("acme/model-7", "Acme", &[&path]).expect("first register failed"));
            let after_first = fs::read_to_string(&path).expect("read failed");

            assert!(!register("acme/model-7", "Acme", &[&path]).expect("second register failed"));
            assert_eq!(fs::read_to_string(&path).expect("read failed"), after_first);

            let entries = read_json(&path);
            assert_eq!(entries.as_array().map(Vec::len), Some(1));
        }

        it "leaves a registry that already has the id untouched" {
            let original = r#"[{"id": "acme/model-7", "name": "old"}]"#;
            let path = write_registry(dir.path(), "models.json", original);

            let changed = register("acme/model-7", "new", &[&path]).expect("register failed");

            assert!(!changed);
            assert_eq!(fs::read_to_string(&path).expect("read failed"), original);
        }

        it "preserves existing entries and their order" {
            let path = write_registry(
                dir.path(),
                "models.json",
                r#"[
                    {"name": "Tiny (WebGPU)", "id": "onnx-community/whisper-tiny", "type": "webgpu", "config": {"quantization": "q4"}},
                    {"id": "local-server", "name": "Local Server", "type": "remote"}
                ]"#,
            );

            register("acme/model-7", "Acme", &[&path]).expect("register failed");

            let entries = read_json(&path);
            assert_eq!(
                entries,
                json!([
                    {"name": "Tiny (WebGPU)", "id": "onnx-community/whisper-tiny", "type": "webgpu", "config": {"quantization": "q4"}},
                    {"id": "local-server", "name": "Local Server", "type": "remote"},
                    {"id": "acme/model-7", "name": "Acme"}
                ])
            );

            let content = fs::read_to_string(&path).expect("read failed");
            let name_pos = content.find("\"name\": \"Tiny (WebGPU)\"").expect("name present");
            let id_pos = content.find("\"id\": \"onnx-community/whisper-tiny\"").expect("id present");
            assert!(name_pos < id_pos, "key order of existing entries must not change");
        }

        it "writes non-ASCII text unescaped" {
            let path = write_registry(dir.path(), "models.json", "[]");

            register("acme/中文", "語音模型 — 快速", &[&path]).expect("register failed");

            let content = fs::read_to_string(&path).expect("read failed");
            assert!(content.contains("語音模型 — 快速"));
            assert!(!content.contains("\\u"));
            assert_eq!(read_json(&path)[0]["name"], "語音模型 — 快速");
        }

        it "writes with four-space indentation" {
            let path = write_registry(dir.path(), "models.json", "[]");

            register("a", "b", &[&path]).expect("register failed");

            assert_eq!(
                fs::read_to_string(&path).expect("read failed"),
                "[\n    {\n        \"id\": \"a\",\n        \"name\": \"b\"\n    }\n]"
            );
        }

        it "keeps a trailing newline" {
            let path = write_registry(dir.path(), "models.json", "[]\n");

            register("a", "b", &[&path]).expect("register failed");

            assert!(fs::read_to_string(&path).expect("read failed").ends_with("]\n"));
        }

        it "skips missing files" {
            let missing = dir.path().join("missing.json");
            let present = write_registry(dir.path(), "models.json", "[]");

            let changed = register("a", "b", &[&missing, &present]).expect("register failed");

            assert!(changed);
            assert!(!missing.exists());
            assert_eq!(read_json(&present), json!([{"id": "a", "name": "b"}]));
        }

        it "reports no change when every target is missing" {
            let missing = dir.path().join("missing.json");

            assert!(!register("a", "b", &[&missing]).expect("register failed"));
        }

        it "updates each target independently" {
            let has_it = write_registry(dir.path(), "public.json", r#"[{"id": "a", "name": "old"}]"#);
            let lacks_it = write_registry(dir.path(), "dist.json", "[]");

            let changed = register("a", "b", &[&has_it, &lacks_it]).expect("register failed");

            assert!(changed);
            assert_eq!(read_json(&has_it), json!([{"id": "a", "name": "old"}]));
            assert_eq!(read_json(&lacks_it), json!([{"id": "a", "name": "b"}]));
        }

        it "aborts on invalid JSON without touching later targets" {
            let broken = write_registry(dir.path(), "broken.json", "[{");
            let later = write_registry(dir.path(), "later.json", "[]");

            let err = register("a", "b", &[&broken, &later]).unwrap_err();

            assert!(matches!(err, RegistryError::Parse { .. }));
            assert_eq!(fs::read_to_string(&later).expect("read failed"), "[]");
        }

        it "rejects a registry that is not an array" {
            let path = write_registry(dir.path(), "models.json", r#"{"id": "a"}"#);

            let err = register("a", "b", &[&path]).unwrap_err();

            assert!(matches!(err, RegistryError::NotAnArray { .. }));
        }

        it "rejects entries without an id" {
            let path = write_registry(dir.path(), "models.json", r#"[{"id": "x", "name": "x"}, {"name": "y"}]"#);

            let err = register("a", "b", &[&path]).unwrap_err();

            assert!(matches!(err, RegistryError::MissingId { index: 1, .. }));
            assert!(err.to_string().contains("models.json"));
        }

        it "accepts existing entries with non-string ids" {
            let path = write_registry(dir.path(), "models.json", r#"[{"id": 123, "name": "legacy"}]"#);

            let changed = register("acme/model-7", "Acme", &[&path]).expect("register failed");

            assert!(changed);
            assert_eq!(
                read_json(&path),
                json!([{"id": 123, "name": "legacy"}, {"id": "acme/model-7", "name": "Acme"}])
            );
        }

        it "aborts on an unwritable target without touching later targets" {
            let locked = write_registry(dir.path(), "locked.json", "[]");
            let later = write_registry(dir.path(), "later.json", "[]");
            let mut permissions = fs::metadata(&locked).expect("metadata failed").permissions();
            permissions.set_readonly(true);
            fs::set_permissions(&locked, permissions).expect("set_permissions failed");

            // Privileged users can write read-only files; nothing to check then.
            if fs::OpenOptions::new().append(true).open(&locked).is_ok() {
                return;
            }

            let err = register("a", "b", &[&locked, &later]).unwrap_err();

            assert!(matches!(err, RegistryError::Write { .. }));
            assert_eq!(fs::read_to_string(&locked).expect("read failed"), "[]");
            assert_eq!(fs::read_to_string(&later).expect("read failed"), "[]");
        }

        it "fails when the target cannot be read as a file" {
            let err = register("a", "b", &[dir.path()]).unwrap_err();

            assert!(matches!(err, RegistryError::Read { .. }));
        }
    }

    describe "registry type" {
        it "returns None for a missing file" {
            let loaded = Registry::load(dir.path().join("none.json")).expect("load failed");

            assert!(loaded.is_none());
        }

        it "lists ids in file order" {
            let path = write_registry(dir.path(), "models.json", r#"[{"id": "b", "name": "B"}, {"id": "a", "name": "A"}]"#);

            let registry = Registry::load(&path).expect("load failed").expect("registry exists");

            assert_eq!(registry.ids().collect::<Vec<_>>(), vec!["b", "a"]);
            assert!(registry.contains("a"));
            assert!(!registry.contains("c"));
            assert_eq!(registry.len(), 2);
        }

        it "reports a write error when the file was replaced by a directory" {
            let path = write_registry(dir.path(), "models.json", "[]");

            let mut registry = Registry::load(&path).expect("load failed").expect("registry exists");
            registry.push(&ModelEntry::new("a", "A")).expect("push failed");
            fs::remove_file(&path).expect("remove failed");
            fs::create_dir(&path).expect("create_dir failed");

            let err = registry.save().unwrap_err();

            assert!(matches!(err, RegistryError::Write { .. }));
            assert_eq!(registry.path(), path.as_path());
        }

        it "does not write until saved" {
            let path = write_registry(dir.path(), "models.json", "[]");

            let mut registry = Registry::load(&path).expect("load failed").expect("registry exists");
            registry.push(&ModelEntry::new("a", "A")).expect("push failed");

            assert_eq!(fs::read_to_string(&path).expect("read failed"), "[]");

            registry.save().expect("save failed");
            assert_eq!(read_json(&path), json!([{"id": "a", "name": "A"}]));
        }
    }
}
