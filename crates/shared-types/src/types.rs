/// A single finding from the "Issues Found" section of a review report
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Issue {
    pub title: String, // Always a single non-empty line
    pub explanation: String,
}

impl Issue {
    /// Issue whose title and explanation are the same line
    pub fn from_line(line: &str) -> Self {
        Self {
            title: line.to_string(),
            explanation: line.to_string(),
        }
    }

    /// Issue from possibly multi-line text. The title is the text on one
    /// line with whitespace runs collapsed.
    pub fn from_text(text: &str) -> Self {
        Self {
            title: text.split_whitespace().collect::<Vec<_>>().join(" "),
            explanation: text.to_string(),
        }
    }

    /// Short title: everything before the first colon, or the whole title
    pub fn short_title(&self) -> &str {
        let head = self.title.split(':').next().unwrap_or("").trim();
        if head.is_empty() {
            self.title.trim()
        } else {
            head
        }
    }
}

/// A clause the reviewer recommends adding to the contract
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Clause {
    pub name: String,
    pub reason: String,
    pub draft_text: String,
    pub link: Option<String>,
}

impl Clause {
    /// A clause with neither a name nor draft text carries no recommendation
    pub fn is_noise(&self) -> bool {
        self.name.is_empty() && self.draft_text.is_empty()
    }
}

/// Structured form of one generated review report
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ParsedReport {
    pub contract_type: String,
    pub issues: Vec<Issue>,
    pub recommended_clauses: Vec<Clause>,
    pub improved_draft: String,
    pub disclaimer: String,
}

impl ParsedReport {
    /// Render the record back into the labeled section convention the
    /// review prompt asks the generator for.
    pub fn to_canonical_text(&self) -> String {
        let mut out = String::new();

        out.push_str("Contract Type Detected: ");
        out.push_str(&self.contract_type);
        out.push_str("\n\nIssues Found:\n");
        for (i, issue) in self.issues.iter().enumerate() {
            // Continuation lines are indented under their numbered item
            let mut lines = issue.explanation.lines().map(str::trim).filter(|l| !l.is_empty());
            out.push_str(&format!("{}. {}\n", i + 1, lines.next().unwrap_or("")));
            for line in lines {
                out.push_str(&format!("   {}\n", line));
            }
        }

        out.push_str("\nRecommended Clauses:\n");
        for clause in &self.recommended_clauses {
            out.push_str(&format!("- {}:", clause.name));
            if !clause.reason.is_empty() {
                out.push_str(&format!(" Reason: {}", clause.reason));
            }
            if !clause.draft_text.is_empty() {
                out.push_str(&format!(" Draft: {}", clause.draft_text));
            }
            if let Some(link) = &clause.link {
                out.push_str(&format!(" Link: {}", link));
            }
            out.push('\n');
        }

        out.push_str("\nImproved Contract:\n");
        out.push_str(&self.improved_draft);
        out.push('\n');

        if !self.disclaimer.is_empty() {
            out.push_str("\nReminder:\n");
            out.push_str(&self.disclaimer);
            out.push('\n');
        }

        out
    }
}
