//! Integration tests for the export pipeline
//!
//! Uses in-process fakes for the host exporter and the converter, plus a
//! shell-script converter on unix to exercise the real process path.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tempfile::tempdir;

use exor_export::options::BatchMode;
use exor_export::{
    ConversionError, ConversionOutcome, Converter, ConverterFailurePolicy, ConverterFlags,
    DelegateError, ExportDescriptor, ExportError, ExportOptions, ExportPipeline, FbxWriter,
    MeshExportAddon, ToolConfig,
};

/// Host exporter that writes placeholder FBX files
struct FakeWriter {
    /// Scene/collection names written in batch mode, next to the requested path
    batch_names: Vec<&'static str>,
    calls: Rc<RefCell<usize>>,
}

impl FakeWriter {
    fn single() -> Self {
        Self {
            batch_names: vec![],
            calls: Rc::default(),
        }
    }

    fn batch(names: Vec<&'static str>) -> Self {
        Self {
            batch_names: names,
            calls: Rc::default(),
        }
    }
}

impl FbxWriter for FakeWriter {
    fn write(&self, descriptor: &ExportDescriptor) -> Result<Vec<PathBuf>, DelegateError> {
        *self.calls.borrow_mut() += 1;
        let fbx = descriptor.fbx_path();
        let paths = if descriptor.is_batch() {
            let dir = fbx.parent().unwrap_or(Path::new("."));
            // The host prefixes every file with the full requested name
            let prefix = fbx.file_name().unwrap().to_string_lossy().into_owned();
            self.batch_names
                .iter()
                .map(|s| dir.join(format!("{}{}.fbx", prefix, s)))
                .collect()
        } else {
            vec![fbx.to_path_buf()]
        };
        for path in &paths {
            std::fs::write(path, b"Kaydara FBX Binary").expect("Failed to write fbx");
        }
        Ok(paths)
    }
}

struct FailingWriter;

impl FbxWriter for FailingWriter {
    fn write(&self, _: &ExportDescriptor) -> Result<Vec<PathBuf>, DelegateError> {
        Err(DelegateError::failed("1", "Error: no objects selected"))
    }
}

#[derive(Clone, Copy)]
enum Behaviour {
    Exit(i32),
    LaunchFailure,
}

/// Converter that records its argument lists and whether the FBX existed
struct FakeConverter {
    behaviour: Behaviour,
    calls: Rc<RefCell<Vec<(Vec<String>, bool)>>>,
}

impl FakeConverter {
    fn new(behaviour: Behaviour) -> Self {
        Self {
            behaviour,
            calls: Rc::default(),
        }
    }
}

impl Converter for FakeConverter {
    fn convert(
        &self,
        fbx_path: &Path,
        flags: ConverterFlags,
    ) -> Result<ConversionOutcome, ConversionError> {
        self.calls
            .borrow_mut()
            .push((flags.args(fbx_path), fbx_path.exists()));
        match self.behaviour {
            Behaviour::Exit(code) => Ok(ConversionOutcome { code: Some(code) }),
            Behaviour::LaunchFailure => Err(ConversionError::Launch {
                program: PathBuf::from("fbx_tool_win_release.exe"),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            }),
        }
    }
}

fn deform_only(value: bool) -> ExportOptions {
    ExportOptions {
        use_armature_deform_only: value,
        ..Default::default()
    }
}

/// Deform-only export keeps all bones in the converter
#[test]
fn test_deform_only_export() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mesh = dir.path().join("rig.mesh");
    let fbx = dir.path().join("rig.fbx");

    let converter = FakeConverter::new(Behaviour::Exit(0));
    let calls = converter.calls.clone();
    let pipeline = ExportPipeline::new(FakeWriter::single(), converter);

    let report = pipeline.export(deform_only(true), &mesh).unwrap();

    let calls = calls.borrow();
    assert_eq!(calls.len(), 1);
    let (args, existed) = &calls[0];
    assert_eq!(
        args,
        &vec![
            fbx.to_string_lossy().into_owned(),
            "1".into(),
            "1".into(),
            "1".into(),
            "0".into(),
            "0".into()
        ]
    );
    assert!(existed, "FBX should exist while the converter runs");
    assert!(!fbx.exists(), "FBX should be removed after conversion");

    assert_eq!(report.requested_path, mesh);
    assert_eq!(report.files.len(), 1);
    assert!(report.files[0].intermediate_removed);
    assert_eq!(report.files[0].expected_output, mesh);
    assert!(report.all_converted());
}

/// Full-armature export asks the converter to strip non-deform bones
#[test]
fn test_full_armature_export() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mesh = dir.path().join("scene.mesh");

    let converter = FakeConverter::new(Behaviour::Exit(0));
    let calls = converter.calls.clone();
    let pipeline = ExportPipeline::new(FakeWriter::single(), converter);

    pipeline.export(deform_only(false), &mesh).unwrap();

    let calls = calls.borrow();
    assert_eq!(calls[0].0.last().map(String::as_str), Some("1"));
    assert!(calls[0].0[0].ends_with("scene.fbx"));
    assert!(!dir.path().join("scene.fbx").exists());
}

/// A path with no file name fails before the host or the converter is touched
#[test]
fn test_empty_path_fails_early() {
    let writer = FakeWriter::single();
    let writer_calls = writer.calls.clone();
    let converter = FakeConverter::new(Behaviour::Exit(0));
    let converter_calls = converter.calls.clone();
    let pipeline = ExportPipeline::new(writer, converter);

    let err = pipeline.export(ExportOptions::default(), "").unwrap_err();
    assert!(err.is_configuration());

    let err = pipeline.export(ExportOptions::default(), "out/..").unwrap_err();
    assert!(err.is_configuration());

    assert_eq!(*writer_calls.borrow(), 0);
    assert!(converter_calls.borrow().is_empty());
}

/// A failing converter is logged and the export still succeeds
#[test]
fn test_converter_failure_ignored() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mesh = dir.path().join("rig.mesh");

    let pipeline = ExportPipeline::new(FakeWriter::single(), FakeConverter::new(Behaviour::Exit(2)));
    let report = pipeline.export(ExportOptions::default(), &mesh).unwrap();

    assert!(!report.all_converted());
    assert_eq!(report.failed().count(), 1);
    assert_eq!(report.files[0].outcome.code, Some(2));
    assert!(!dir.path().join("rig.fbx").exists());
}

/// Strict mode turns a failing converter into an error, after cleanup
#[test]
fn test_converter_failure_strict() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mesh = dir.path().join("rig.mesh");

    let pipeline = ExportPipeline::new(FakeWriter::single(), FakeConverter::new(Behaviour::Exit(2)))
        .with_policy(ConverterFailurePolicy::Strict);
    let err = pipeline.export(ExportOptions::default(), &mesh).unwrap_err();

    assert!(matches!(
        err,
        ExportError::Conversion(ConversionError::ExitStatus { .. })
    ));
    assert!(!dir.path().join("rig.fbx").exists());
}

/// A converter that cannot be launched is fatal, and the FBX is still removed
#[test]
fn test_converter_launch_failure() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mesh = dir.path().join("rig.mesh");

    let pipeline =
        ExportPipeline::new(FakeWriter::single(), FakeConverter::new(Behaviour::LaunchFailure));
    let err = pipeline.export(ExportOptions::default(), &mesh).unwrap_err();

    assert!(matches!(
        err,
        ExportError::Conversion(ConversionError::Launch { .. })
    ));
    assert!(!dir.path().join("rig.fbx").exists());
}

/// Host export errors propagate and the converter never runs
#[test]
fn test_delegate_failure_skips_converter() {
    let dir = tempdir().expect("Failed to create temp dir");
    let converter = FakeConverter::new(Behaviour::Exit(0));
    let calls = converter.calls.clone();
    let pipeline = ExportPipeline::new(FailingWriter, converter);

    let err = pipeline
        .export(ExportOptions::default(), dir.path().join("rig.mesh"))
        .unwrap_err();

    assert!(matches!(err, ExportError::Delegate(DelegateError::Failed { .. })));
    assert!(err.to_string().contains("no objects selected"));
    assert!(calls.borrow().is_empty());
}

/// Batch exports convert and clean up every file, in order
#[test]
fn test_batch_export() {
    let dir = tempdir().expect("Failed to create temp dir");
    let prefix = dir.path().join("level_");

    let options = ExportOptions {
        batch_mode: BatchMode::Collection,
        ..Default::default()
    };
    let converter = FakeConverter::new(Behaviour::Exit(0));
    let calls = converter.calls.clone();
    let pipeline = ExportPipeline::new(FakeWriter::batch(vec!["props", "terrain"]), converter);

    let report = pipeline.export(options, &prefix).unwrap();

    assert_eq!(report.files.len(), 2);
    let calls = calls.borrow();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].0[0].ends_with("level_.fbxprops.fbx"));
    assert!(calls[1].0[0].ends_with("level_.fbxterrain.fbx"));
    assert!(calls.iter().all(|(_, existed)| *existed));
    assert!(!dir.path().join("level_.fbxprops.fbx").exists());
    assert!(!dir.path().join("level_.fbxterrain.fbx").exists());
}

/// Strict failure in the middle of a batch still removes the remaining files
#[test]
fn test_batch_strict_failure_cleans_remaining() {
    let dir = tempdir().expect("Failed to create temp dir");
    let prefix = dir.path().join("level_");

    let options = ExportOptions {
        batch_mode: BatchMode::Scene,
        ..Default::default()
    };
    let converter = FakeConverter::new(Behaviour::Exit(1));
    let calls = converter.calls.clone();
    let pipeline = ExportPipeline::new(FakeWriter::batch(vec!["a", "b", "c"]), converter)
        .with_policy(ConverterFailurePolicy::Strict);

    assert!(pipeline.export(options, &prefix).is_err());
    assert_eq!(calls.borrow().len(), 1);
    for stem in ["a", "b", "c"] {
        assert!(!dir.path().join(format!("level_.fbx{}.fbx", stem)).exists());
    }
}

/// Converter that deletes the FBX itself; cleanup must not fail
struct ConsumingConverter;

impl Converter for ConsumingConverter {
    fn convert(
        &self,
        fbx_path: &Path,
        _: ConverterFlags,
    ) -> Result<ConversionOutcome, ConversionError> {
        std::fs::remove_file(fbx_path).expect("Failed to remove fbx");
        Ok(ConversionOutcome::success())
    }
}

#[test]
fn test_already_removed_intermediate() {
    let dir = tempdir().expect("Failed to create temp dir");
    let pipeline = ExportPipeline::new(FakeWriter::single(), ConsumingConverter);

    let report = pipeline
        .export(ExportOptions::default(), dir.path().join("rig.mesh"))
        .unwrap();

    assert!(!report.files[0].intermediate_removed);
}

/// The add-on runs exports only between start and stop
#[test]
fn test_addon_lifecycle() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = ToolConfig {
        on_converter_failure: ConverterFailurePolicy::Strict,
        ..Default::default()
    };
    let mut addon = MeshExportAddon::new(config);

    addon.start_with(ExportPipeline::new(
        FakeWriter::single(),
        FakeConverter::new(Behaviour::Exit(3)),
    ));
    assert!(addon.is_started());

    // Config policy applies to pipelines handed to the add-on
    let err = addon
        .export(ExportOptions::default(), dir.path().join("rig.mesh"))
        .unwrap_err();
    assert!(matches!(err, ExportError::Conversion(_)));

    addon.stop();
    assert!(!addon.is_started());
    assert!(addon
        .export(ExportOptions::default(), dir.path().join("rig.mesh"))
        .unwrap_err()
        .is_configuration());
}

#[cfg(unix)]
mod process {
    use super::*;
    use exor_export::ProcessConverter;
    use std::os::unix::fs::PermissionsExt;

    fn write_script(dir: &Path, exit_code: i32) -> PathBuf {
        let script = dir.join("fbx_tool.sh");
        let body = format!(
            "#!/bin/sh\necho \"$@\" > \"$(dirname \"$1\")/args.txt\"\nexit {}\n",
            exit_code
        );
        std::fs::write(&script, body).expect("Failed to write script");
        let mut perms = std::fs::metadata(&script).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&script, perms).expect("Failed to chmod script");
        script
    }

    /// Real child process receives the fixed argument layout
    #[test]
    fn test_process_converter_arguments() {
        let dir = tempdir().expect("Failed to create temp dir");
        let script = write_script(dir.path(), 0);
        let fbx = dir.path().join("rig.fbx");

        let converter = ProcessConverter::new(&script);
        let outcome = converter
            .convert(&fbx, ConverterFlags::from_deform_only(false))
            .unwrap();

        assert!(outcome.is_success());
        let args = std::fs::read_to_string(dir.path().join("args.txt")).unwrap();
        assert_eq!(args.trim(), format!("{} 1 1 1 0 1", fbx.display()));
    }

    #[test]
    fn test_process_converter_exit_code() {
        let dir = tempdir().expect("Failed to create temp dir");
        let script = write_script(dir.path(), 4);

        let outcome = ProcessConverter::new(&script)
            .convert(&dir.path().join("rig.fbx"), ConverterFlags::from_deform_only(true))
            .unwrap();

        assert_eq!(outcome.code, Some(4));
    }

    #[test]
    fn test_process_pipeline_removes_intermediate() {
        let dir = tempdir().expect("Failed to create temp dir");
        let script = write_script(dir.path(), 0);
        let pipeline = ExportPipeline::new(FakeWriter::single(), ProcessConverter::new(&script));

        pipeline
            .export(deform_only(true), dir.path().join("rig.mesh"))
            .unwrap();

        assert!(!dir.path().join("rig.fbx").exists());
        let args = std::fs::read_to_string(dir.path().join("args.txt")).unwrap();
        assert!(args.trim().ends_with("1 1 1 0 0"));
    }
}
