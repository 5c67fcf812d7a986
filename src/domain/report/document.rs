use crate::domain::sentence::{GeneratedSentence, SentenceMode};
use crate::domain::speech::AudioArtifact;
use std::path::{Path, PathBuf};

pub const REPORT_FILE_NAME: &str = "sentences-web-page.html";

const HEAD: &str = r#"<html><head><title>Generated Sentences</title><meta charset=UTF-8>
        <style>
            table {
                width: 100%;
                border-collapse: collapse;
                table-layout: auto;
            }
            th {
                padding: 10px;
                text-align: left;
            }
            td {
                padding: 10px;
                border: 1px solid black;
                text-align: left;
                font-size: larger;
                height: 50px;
                cursor: pointer;
            }
            .hidden-content {
                opacity: 0.05;
                cursor: pointer;
            }
            .small-text {
                font-size: smaller;
            }
        </style>
    </head>
    <body>
    <script>
    document.addEventListener('DOMContentLoaded', (event) => {
        document.querySelectorAll('.clickable').forEach(function(cell) {
            cell.addEventListener('click', function() {
                toggleVisibility(this);
            });
        });
    });
    function toggleVisibility(td) {
        var isHidden = window.getComputedStyle(td).opacity < 1;
        td.style.opacity = isHidden ? '1' : '0';
        td.style.border = '1px solid black';
    }
    </script>
"#;

const FOOT: &str = "</table></body></html>";

/// One processed card: its sentences and the audio written for it.
#[derive(Debug, Clone)]
pub struct ReportRow {
    pub sentence: GeneratedSentence,
    pub audio: AudioArtifact,
}

/// The day's HTML page, kept as ordered rows and rendered once.
#[derive(Debug, Clone)]
pub struct Report {
    mode: SentenceMode,
    heading: String,
    rows: Vec<ReportRow>,
}

impl Report {
    /// `heading` is shown under the title, typically the store's clock.
    pub fn new(mode: SentenceMode, heading: impl Into<String>) -> Self {
        Self {
            mode,
            heading: heading.into(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: ReportRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn render(&self) -> String {
        let mut html = String::from(HEAD);
        html.push_str("<h1>Generated Sentences</h1>");
        html.push_str(&format!(
            "<h2> {} </h2>",
            html_escape::encode_text(&self.heading)
        ));
        html.push_str("<table>");
        html.push_str(match self.mode {
            SentenceMode::Annotated => {
                "<tr><th>Sentence</th><th>Translation (click to display)</th><th>Audio</th></tr>"
            }
            SentenceMode::Plain => {
                "<tr><th>Sentence 1</th><th>Sentence 2 (click to display)</th><th>Audio</th></tr>"
            }
        });
        for row in &self.rows {
            html.push_str(&render_row(row));
        }
        html.push_str(FOOT);
        html
    }

    /// Write the page into `output_dir`, replacing any earlier page there.
    pub async fn write(&self, output_dir: &Path) -> std::io::Result<PathBuf> {
        tokio::fs::create_dir_all(output_dir).await?;
        let path = output_dir.join(REPORT_FILE_NAME);
        tokio::fs::write(&path, self.render()).await?;
        Ok(path)
    }
}

// sentence1 is trusted markup (ruby tags); sentence2 is plain text.
fn render_row(row: &ReportRow) -> String {
    let sentence = &row.sentence;
    let performance = sentence
        .performance()
        .map(|p| {
            format!(
                "<br><span class=\"small-text\">Interval: {} Ease: {} Flags: {}</span>",
                p.last_interval, p.ease, p.flags
            )
        })
        .unwrap_or_default();

    format!(
        "<tr data-card-id=\"{id}\"><td>{primary}{performance}</td>\
         <td class=\"clickable hidden-content\">{secondary}</td>\
         <td><audio controls><source src=\"{src}\" type=\"{mime}\">The html audio element is not supported.</audio></td></tr>",
        id = sentence.id,
        primary = sentence.sentence1,
        performance = performance,
        secondary = html_escape::encode_text(&sentence.sentence2),
        src = html_escape::encode_double_quoted_attribute(&row.audio.file_name),
        mime = row.audio.format.mime_type(),
    )
}
