use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::browser::{SessionSettings, Viewport};
use crate::config::{Config, WebsiteStrategy};

pub const ARTICLE_SCROLLS: usize = 8;
pub const WEBSITE_MAX_CYCLES: usize = 3;
pub const WEBSITE_FINAL_SWEEPS: usize = 2;

pub const ARTICLE_INSTRUCTION: &str = "Extract the complete article content from this fully loaded page. \
This includes the main title, all subheadings, paragraphs, lists, key takeaways, and all other text in \
the article's body. Preserve paragraphs and line breaks so the text stays readable. Exclude sidebars, \
navigation menus, ads, and footers.";

pub const WEBSITE_INSTRUCTION: &str = "Extract all visible text content from this fully expanded page, \
including headings, paragraphs, lists, the contents of every opened tab and accordion, and tabular \
data rendered row by row. Preserve paragraphs and line breaks. Exclude navigation menus, cookie \
notices, and ads.";

pub const INTERACTIVE_ELEMENTS_QUERY: &str = "Find all tabs, accordions, and 'show more', 'read more' \
or FAQ controls that reveal more text on this page without navigating away from it.";

/// Which kind of page the caller expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Category {
    /// Interactive pages: tabs, accordions, expandable sections.
    Website,
    /// Long-form reading pages that load as you scroll.
    #[default]
    Article,
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Website => write!(f, "Website"),
            Category::Article => write!(f, "Article"),
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Website" => Ok(Self::Website),
            "Article" => Ok(Self::Article),
            _ => Err("category must be one of: Website, Article".to_string()),
        }
    }
}

/// How hidden content gets onto the page before extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revelation {
    /// Scroll down `count` times.
    Scroll { count: usize },
    /// Observe and activate interactive elements, then sweep to the bottom.
    Interact {
        max_cycles: usize,
        final_sweeps: usize,
    },
    /// Delegate revelation and extraction to the remote agent.
    Agent { max_steps: u32 },
}

/// Everything a category decides for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapePlan {
    pub category: Category,
    pub model_name: String,
    pub block_ads: bool,
    pub viewport: Viewport,
    pub revelation: Revelation,
    pub instruction: &'static str,
}

impl ScrapePlan {
    pub fn for_category(category: Category, config: &Config) -> Self {
        match category {
            Category::Article => Self {
                category,
                model_name: config.article_model().to_string(),
                block_ads: true,
                viewport: Viewport {
                    width: 1280,
                    height: 800,
                },
                revelation: Revelation::Scroll {
                    count: ARTICLE_SCROLLS,
                },
                instruction: ARTICLE_INSTRUCTION,
            },
            Category::Website => Self {
                category,
                model_name: config.website_model().to_string(),
                block_ads: true,
                viewport: Viewport {
                    width: 1920,
                    height: 1080,
                },
                revelation: match config.website_strategy() {
                    WebsiteStrategy::Loop => Revelation::Interact {
                        max_cycles: WEBSITE_MAX_CYCLES,
                        final_sweeps: WEBSITE_FINAL_SWEEPS,
                    },
                    WebsiteStrategy::Agent => Revelation::Agent {
                        max_steps: config.agent_max_steps(),
                    },
                },
                instruction: WEBSITE_INSTRUCTION,
            },
        }
    }

    pub fn session_settings(&self, config: &Config) -> SessionSettings {
        SessionSettings {
            api_key: config.browserbase_api_key().to_string(),
            project_id: config.browserbase_project_id().to_string(),
            model_name: self.model_name.clone(),
            model_api_key: config.model_api_key().to_string(),
            block_ads: self.block_ads,
            viewport: self.viewport,
        }
    }

    /// Single goal handed to the agent: reveal everything, then report it.
    pub fn agent_goal(&self) -> String {
        format!(
            "Dismiss any cookie banner or sign-up prompt, open every tab, accordion and \
'show more' control on this page without leaving it, then answer with the following. {}",
            self.instruction
        )
    }
}
