//! Prompt text sent to the model
//!
//! The system instruction, the retrieval prompt wrapped around a research topic and the
//! canned quick-action prompts, one per analysis mode.

use scholar_babel::ResearchMode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const SYSTEM_INSTRUCTION: &str = r#"You are ScholarSync, a world-class academic research assistant specialized in bibliometric analysis, methodology critique, and theoretical framework mapping.
Your primary goal is to help researchers conduct systematic literature reviews and identify research gaps.

When summarizing articles:
1. Focus on high-impact studies indexed in Scopus or Web of Science.
2. Strictly adhere to user-specified constraints regarding Journal Quartiles (Q1, Q2, Q3, Q4) or Impact Factors.
3. Provide Title, Authors, Year, and a concise summary highlighting the Research Problem, Method, and Key Finding.
4. If asked for a "Map Design" or diagram, use Mermaid.js syntax inside a ```mermaid block.
5. For Bibliometric Analysis (trends or keywords):
   - Provide structured Markdown tables.
   - ALSO provide an interactive chart by using a ```json-chart code block with this format:
     {
       "type": "bar" | "line",
       "title": "Clear Title",
       "xAxisLabel": "Label",
       "yAxisLabel": "Label",
       "data": [
         { "label": "2020", "value": 45 },
         { "label": "2021", "value": 52 }
       ]
     }
6. Always maintain an objective, formal academic tone.
7. Use citations where appropriate (Author, Year)."#;

const INDEX_FILTER: &str = "Focus on sources indexed in Scopus or Web of Science.";

/// How strictly the first retrieval restricts journal rank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    Broad,
    #[default]
    High,
    Ultra,
}

impl Precision {
    pub const ALL: [Precision; 3] = [Precision::Broad, Precision::High, Precision::Ultra];

    pub fn as_str(&self) -> &'static str {
        match self {
            Precision::Broad => "broad",
            Precision::High => "high",
            Precision::Ultra => "ultra",
        }
    }

    /// Source filter sentence appended to the retrieval prompt.
    pub fn filter(&self) -> String {
        let extra = match self {
            Precision::Broad => "",
            Precision::High => " Prioritize articles from Q1 or Q2 ranked journals with high impact factors (IF > 2.0).",
            Precision::Ultra => " Strictly only include articles from Q1 ranked journals or flagship publications with top-tier impact factors (IF > 5.0).",
        };
        format!("{INDEX_FILTER}{extra}")
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Precision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown precision level '{s}' (expected broad, high or ultra)"))
    }
}

/// Prompt sent for the first free-text request of a session.
pub fn retrieval_prompt(topic: &str, precision: Precision) -> String {
    format!(
        "Act as a senior researcher. Retrieve and summarize the top 5 high-impact research articles about \"{topic}\". {} For each, provide Title, Authors, Year, and a concise summary including Research Problem, Method, and Finding.",
        precision.filter()
    )
}

/// A canned follow-up request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickAction {
    pub label: &'static str,
    pub mode: ResearchMode,
    pub prompt: &'static str,
}

pub const QUICK_ACTIONS: [QuickAction; 5] = [
    QuickAction {
        label: "Methodology Analysis",
        mode: ResearchMode::Methodology,
        prompt: "Analyze the research methodologies used in these high-impact articles. Explain the study design, sampling frame, and data analysis techniques used in this field.",
    },
    QuickAction {
        label: "Theoretical Frameworks",
        mode: ResearchMode::Framework,
        prompt: "What theoretical or conceptual frameworks are commonly employed in these studies? Map how they guide current research inquiries.",
    },
    QuickAction {
        label: "Visual Map",
        mode: ResearchMode::DesignMap,
        prompt: "Create a visual Mermaid.js diagram mapping the design framework or research flow for these studies. Show relationships between concepts and research phases. Use double quotes for all node labels.",
    },
    QuickAction {
        label: "Bibliometric Table",
        mode: ResearchMode::Bibliometric,
        prompt: "Perform a bibliometric analysis for this research topic. Focus on Q1 and Q2 ranked journals. Present data in structured markdown tables showing publication trends and key keywords.",
    },
    QuickAction {
        label: "Research Gaps",
        mode: ResearchMode::Gaps,
        prompt: "Identify critical research gaps highlighted in these articles. What limitations are mentioned, and what future research directions are needed most?",
    },
];

/// The quick action for a mode. `Retrieve` has none.
pub fn quick_action(mode: ResearchMode) -> Option<&'static QuickAction> {
    QUICK_ACTIONS.iter().find(|action| action.mode == mode)
}
