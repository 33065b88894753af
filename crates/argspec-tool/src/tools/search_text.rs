use std::path::Path;
use std::sync::Arc;

use glob_match::glob_match;
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use walkdir::{DirEntry, WalkDir};

use argspec_core::{arg, Arg, Arguments};
use argspec_schema::{InputSchema, Params};

use crate::response::ErrorResponse;
use crate::tool::Tool;
use crate::workspace::{OpenProjects, Project};

/// Directory names never descended into.
const SKIPPED_DIRECTORIES: &[&str] = &["node_modules", "build", "out", "target"];

const DEFAULT_MAX_RESULTS: i64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMatch {
    pub file_path: String,
    pub line: usize,
    pub column: usize,
    pub matched_text: String,
    pub line_content: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchTextResponse {
    pub search_text: String,
    pub use_regex: bool,
    pub case_sensitive: bool,
    pub file_pattern: Option<String>,
    pub total_matches: usize,
    pub truncated: bool,
    pub matches: Vec<SearchMatch>,
}

type SearchTextArgs = (
    Arg<String>,
    Arg<Project>,
    Arg<bool>,
    Arg<bool>,
    Arg<Option<String>>,
    Arg<i64>,
    Arg<Vec<String>>,
);

struct Query {
    matcher: Regex,
    file_pattern: Option<String>,
    excluded: Vec<String>,
    max_results: usize,
}

/// `search_text`: literal or regex search over the text files of a project.
pub struct SearchText {
    params: Params<SearchTextArgs>,
    max_read_bytes: u64,
}

impl SearchText {
    pub fn new(projects: Arc<OpenProjects>, max_read_bytes: u64) -> Self {
        Self {
            params: Params::new((
                arg::string("searchText", "The text or pattern to search for").required(),
                arg::project(projects),
                arg::boolean("useRegex", "Use regular expression matching").optional_or(false),
                arg::boolean("caseSensitive", "Case-sensitive matching").optional_or(false),
                arg::string(
                    "filePattern",
                    "File name pattern to filter (e.g., '*.java', '*.xml')",
                )
                .optional(),
                arg::integer("maxResults", "Maximum number of results to return")
                    .min(1)
                    .optional_or(DEFAULT_MAX_RESULTS),
                arg::string_array(
                    "excludeDirectories",
                    "Directory names to skip in addition to hidden and build output directories",
                )
                .optional(),
            )),
            max_read_bytes,
        }
    }

    fn search(&self, project: &Project, query: &Query) -> Vec<SearchMatch> {
        let mut matches = Vec::new();
        let walker = WalkDir::new(project.base_path().as_path())
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_skipped_dir(entry, &query.excluded));

        for entry in walker {
            if matches.len() >= query.max_results {
                break;
            }
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() || !query.accepts_name(entry.file_name()) {
                continue;
            }
            if let Some(text) = self.read_text(entry.path()) {
                query.search_in(entry.path(), &text, &mut matches);
            }
        }
        matches
    }

    /// File text, or `None` for oversized, binary and non-UTF-8 files.
    fn read_text(&self, path: &Path) -> Option<String> {
        let metadata = std::fs::metadata(path).ok()?;
        if metadata.len() > self.max_read_bytes {
            return None;
        }
        let bytes = std::fs::read(path).ok()?;
        if bytes.contains(&0) {
            return None;
        }
        String::from_utf8(bytes).ok()
    }
}

impl Query {
    fn accepts_name(&self, name: &std::ffi::OsStr) -> bool {
        let Some(pattern) = &self.file_pattern else {
            return true;
        };
        name.to_str()
            .is_some_and(|name| glob_match(pattern, &name.to_lowercase()))
    }

    fn search_in(&self, path: &Path, text: &str, matches: &mut Vec<SearchMatch>) {
        for (index, raw_line) in text.split('\n').enumerate() {
            let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
            for found in self.matcher.find_iter(line) {
                if matches.len() >= self.max_results {
                    return;
                }
                if found.as_str().is_empty() {
                    continue;
                }
                matches.push(SearchMatch {
                    file_path: path.display().to_string(),
                    line: index + 1,
                    column: line[..found.start()].chars().count() + 1,
                    matched_text: found.as_str().to_string(),
                    line_content: line.trim().to_string(),
                });
            }
        }
    }
}

fn is_skipped_dir(entry: &DirEntry, excluded: &[String]) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let Some(name) = entry.file_name().to_str() else {
        return false;
    };
    name.starts_with('.')
        || SKIPPED_DIRECTORIES.iter().any(|skipped| *skipped == name)
        || excluded.iter().any(|e| e == name)
}

impl Tool for SearchText {
    type Response = SearchTextResponse;

    fn name(&self) -> &str {
        "search_text"
    }

    fn description(&self) -> &str {
        "Search for text in project files. Supports regular expressions and case-sensitive matching."
    }

    fn input_schema(&self) -> &InputSchema {
        self.params.schema()
    }

    fn execute(&self, arguments: &Arguments) -> Result<SearchTextResponse, ErrorResponse> {
        self.params
            .validate(arguments)
            .map_n(
                |search_text, project, use_regex, case_sensitive, file_pattern, max_results, excluded|
                 -> Result<SearchTextResponse, ErrorResponse> {
                    let source = if use_regex {
                        search_text.clone()
                    } else {
                        regex::escape(&search_text)
                    };
                    let matcher = RegexBuilder::new(&source)
                        .case_insensitive(!case_sensitive)
                        .build()
                        .map_err(|e| ErrorResponse::new(format!("Invalid regular expression: {e}")))?;
                    let query = Query {
                        matcher,
                        file_pattern: file_pattern
                            .as_deref()
                            .filter(|p| !p.is_empty())
                            .map(str::to_lowercase),
                        excluded,
                        max_results: usize::try_from(max_results).unwrap_or(usize::MAX),
                    };

                    let matches = self.search(&project, &query);
                    tracing::debug!(
                        project = project.name(),
                        matches = matches.len(),
                        "search finished"
                    );
                    Ok(SearchTextResponse {
                        search_text,
                        use_regex,
                        case_sensitive,
                        file_pattern,
                        total_matches: matches.len(),
                        truncated: matches.len() >= query.max_results,
                        matches,
                    })
                },
            )
            .or_else_errors(|errors| Err(errors.into()))
    }
}
