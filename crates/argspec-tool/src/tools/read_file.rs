use std::io;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use argspec_core::{arg, Arg, Arguments, ContainmentError, ProjectRelativePath};
use argspec_schema::{InputSchema, Params};

use crate::response::{ErrorResponse, LineRange};
use crate::tool::Tool;
use crate::workspace::{OpenProjects, Project};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadFileResponse {
    pub file_path: String,
    pub content: String,
    pub total_lines: usize,
    #[serde(flatten)]
    pub range: LineRange,
}

type ReadFileArgs = (
    Arg<ProjectRelativePath>,
    Arg<Project>,
    Arg<Option<i64>>,
    Arg<Option<i64>>,
);

/// `read_file`: a file's text by project-relative path, optionally limited
/// to a 1-based inclusive line range.
pub struct ReadFile {
    params: Params<ReadFileArgs>,
    max_read_bytes: u64,
}

impl ReadFile {
    pub fn new(projects: Arc<OpenProjects>, max_read_bytes: u64) -> Self {
        Self {
            params: Params::new((
                arg::project_relative_path(
                    "filePath",
                    "Relative path from the project root to the file to read",
                ),
                arg::project(projects),
                arg::integer(
                    "startLine",
                    "Start line number (1-based, inclusive). If not specified, reads from the beginning.",
                )
                .min(1)
                .optional(),
                arg::integer(
                    "endLine",
                    "End line number (1-based, inclusive). If not specified, reads to the end.",
                )
                .min(1)
                .optional(),
            )),
            max_read_bytes,
        }
    }

    fn read(
        &self,
        file_path: &ProjectRelativePath,
        project: &Project,
        start_line: Option<i64>,
        end_line: Option<i64>,
    ) -> Result<ReadFileResponse, ErrorResponse> {
        let path = file_path
            .resolve_contained(project.base_path())
            .map_err(containment_error)?;
        let text = read_text(&path, self.max_read_bytes)?;

        let lines: Vec<&str> = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();
        let total_lines = lines.len();
        let start = start_line.map_or(1, line_number);
        let requested_end = end_line.map_or(total_lines, line_number);

        if requested_end < start {
            return Err(ErrorResponse::new(format!(
                "endLine ({requested_end}) must be >= startLine ({start})"
            )));
        }
        if start > total_lines {
            return Err(ErrorResponse::new(format!(
                "startLine ({start}) is beyond the end of the file ({total_lines} lines)"
            )));
        }
        let end = requested_end.min(total_lines);
        let range = LineRange::new(start, end)
            .ok_or_else(|| ErrorResponse::new(format!("invalid line range {start}..{end}")))?;

        Ok(ReadFileResponse {
            file_path: path.display().to_string(),
            content: lines[start - 1..end].join("\n"),
            total_lines,
            range,
        })
    }
}

impl Tool for ReadFile {
    type Response = ReadFileResponse;

    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Read the content of a file by its path relative to the project root. Supports optional line range."
    }

    fn input_schema(&self) -> &InputSchema {
        self.params.schema()
    }

    fn execute(&self, arguments: &Arguments) -> Result<ReadFileResponse, ErrorResponse> {
        self.params
            .validate(arguments)
            .map_n(|file_path, project, start_line, end_line| {
                self.read(&file_path, &project, start_line, end_line)
            })
            .or_else_errors(|errors| Err(errors.into()))
    }
}

fn line_number(n: i64) -> usize {
    usize::try_from(n).unwrap_or(usize::MAX)
}

pub(crate) fn containment_error(error: ContainmentError) -> ErrorResponse {
    match error {
        ContainmentError::Escapes { .. } | ContainmentError::DanglingLink(_) => {
            ErrorResponse::new("Path is outside the project directory")
        }
        ContainmentError::Io { .. } => ErrorResponse::new(error),
    }
}

fn read_text(path: &Path, max_read_bytes: u64) -> Result<String, ErrorResponse> {
    let metadata = std::fs::metadata(path).map_err(|e| io_error(path, e))?;
    if metadata.is_dir() {
        return Err(ErrorResponse::new(format!(
            "Path is a directory, not a file: {}",
            path.display()
        )));
    }
    if metadata.len() > max_read_bytes {
        return Err(ErrorResponse::new(format!(
            "File is too large to read ({} bytes, limit {max_read_bytes}): {}",
            metadata.len(),
            path.display()
        )));
    }
    let bytes = std::fs::read(path).map_err(|e| io_error(path, e))?;
    String::from_utf8(bytes).map_err(|_| {
        ErrorResponse::new(format!(
            "Cannot read file (binary or unsupported format): {}",
            path.display()
        ))
    })
}

fn io_error(path: &Path, error: io::Error) -> ErrorResponse {
    if error.kind() == io::ErrorKind::NotFound {
        ErrorResponse::new(format!("File not found: {}", path.display()))
    } else {
        ErrorResponse::new(format!("Cannot read {}: {error}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    struct Fixture {
        _dir: tempfile::TempDir,
        tool: ReadFile,
        project: Project,
    }

    fn fixture(max_read_bytes: u64) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("src")).unwrap();
        std::fs::write(dir.path().join("src/lib.rs"), "one\ntwo\r\nthree\nfour\n").unwrap();
        std::fs::write(dir.path().join("blob.bin"), [0xff, 0xfe, 0x00]).unwrap();
        let projects = Arc::new(OpenProjects::new());
        let project = projects.open(dir.path()).unwrap();
        Fixture {
            _dir: dir,
            tool: ReadFile::new(projects, max_read_bytes),
            project,
        }
    }

    fn call(fixture: &Fixture, extra: Value) -> Result<ReadFileResponse, ErrorResponse> {
        let mut args = extra.as_object().cloned().unwrap_or_default();
        args.insert(
            "projectPath".into(),
            Value::String(fixture.project.base_path().as_str().to_string()),
        );
        fixture.tool.execute(&args)
    }

    #[test]
    fn test_reads_whole_file() {
        let f = fixture(1024);
        let response = call(&f, json!({"filePath": "src/lib.rs"})).unwrap();
        assert_eq!(response.content, "one\ntwo\nthree\nfour\n");
        assert_eq!(response.total_lines, 5);
        assert_eq!(response.range, LineRange::new(1, 5).unwrap());
        assert!(response.file_path.ends_with("lib.rs"));
    }

    #[test]
    fn test_reads_line_range_and_clamps_end() {
        let f = fixture(1024);
        let response = call(&f, json!({"filePath": "src/lib.rs", "startLine": 2, "endLine": 3})).unwrap();
        assert_eq!(response.content, "two\nthree");

        let response = call(&f, json!({"filePath": "src/lib.rs", "startLine": 4, "endLine": 99})).unwrap();
        assert_eq!(response.content, "four\n");
        assert_eq!(response.range.end_line, 5);
    }

    #[test]
    fn test_wire_form_is_flat() {
        let f = fixture(1024);
        let response = call(&f, json!({"filePath": "src/lib.rs", "startLine": 1, "endLine": 1})).unwrap();
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["startLine"], 1);
        assert_eq!(value["endLine"], 1);
        assert_eq!(value["lineCount"], 1);
        assert_eq!(value["totalLines"], 5);
        assert_eq!(value["content"], "one");
    }

    #[test]
    fn test_inverted_range() {
        let f = fixture(1024);
        let err = call(&f, json!({"filePath": "src/lib.rs", "startLine": 3, "endLine": 2})).unwrap_err();
        assert_eq!(err.message(), "Error: endLine (2) must be >= startLine (3)");
    }

    #[test]
    fn test_start_beyond_end() {
        let f = fixture(1024);
        let err = call(&f, json!({"filePath": "src/lib.rs", "startLine": 9})).unwrap_err();
        assert_eq!(
            err.message(),
            "Error: startLine (9) is beyond the end of the file (5 lines)"
        );
    }

    #[test]
    fn test_file_errors() {
        let f = fixture(1024);
        let missing = call(&f, json!({"filePath": "nope.txt"})).unwrap_err();
        assert!(missing.message().starts_with("Error: File not found: "));

        let dir = call(&f, json!({"filePath": "src"})).unwrap_err();
        assert!(dir.message().starts_with("Error: Path is a directory, not a file: "));

        let binary = call(&f, json!({"filePath": "blob.bin"})).unwrap_err();
        assert!(binary
            .message()
            .starts_with("Error: Cannot read file (binary or unsupported format): "));
    }

    #[test]
    fn test_size_limit() {
        let f = fixture(4);
        let err = call(&f, json!({"filePath": "src/lib.rs"})).unwrap_err();
        assert!(err.message().starts_with("Error: File is too large to read"));
    }

    #[test]
    fn test_argument_errors_are_collected() {
        let f = fixture(1024);
        let err = call(&f, json!({"filePath": "../../etc/passwd", "startLine": 0})).unwrap_err();
        assert_eq!(
            err.message(),
            "Error: Path is outside the project directory, startLine must be at least 1"
        );
    }

    #[test]
    fn test_unknown_project() {
        let f = fixture(1024);
        let args = json!({"filePath": "a.txt", "projectPath": "/no/such/project"});
        let err = f.tool.execute(args.as_object().unwrap()).unwrap_err();
        assert_eq!(err.message(), "Error: Project not found at path: /no/such/project");
    }

    #[test]
    fn test_project_with_trailing_space_does_not_resolve_to_sibling() {
        let dir = tempfile::tempdir().unwrap();
        let spaced = dir.path().join("app ");
        std::fs::create_dir(&spaced).unwrap();
        std::fs::write(spaced.join("inside.txt"), "in-project").unwrap();
        std::fs::create_dir(dir.path().join("app")).unwrap();
        std::fs::write(dir.path().join("app/secret.txt"), "not-in-project").unwrap();

        let projects = Arc::new(OpenProjects::new());
        let project = projects.open(&spaced).unwrap();
        let tool = ReadFile::new(projects, 1024);
        let call = |file: &str| {
            let args = json!({"filePath": file, "projectPath": project.base_path().as_str()});
            tool.execute(args.as_object().unwrap())
        };

        assert_eq!(call("inside.txt").unwrap().content, "in-project");
        let err = call("secret.txt").unwrap_err();
        assert!(err.message().starts_with("Error: File not found: "));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_out_of_project_is_rejected() {
        let f = fixture(1024);
        let outside = tempfile::tempdir().unwrap();
        std::fs::write(outside.path().join("secret"), "s").unwrap();
        std::os::unix::fs::symlink(outside.path(), f.project.base_path().as_path().join("link"))
            .unwrap();
        let err = call(&f, json!({"filePath": "link/secret"})).unwrap_err();
        assert_eq!(err.message(), "Error: Path is outside the project directory");
    }
}
