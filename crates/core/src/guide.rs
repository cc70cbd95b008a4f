//! Static guidance about when AI Overviews appear and what they draw on.

use serde::Serialize;

/// Emphasis for a callout under a guide item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Callout {
    Info,
    Warning,
    Success,
}

/// One titled point.
#[derive(Debug, Clone, Serialize)]
pub struct GuideItem {
    pub title: &'static str,
    pub body: &'static str,
    pub callout: Option<(Callout, &'static str)>,
}

/// A group of points.
#[derive(Debug, Clone, Serialize)]
pub struct GuideSection {
    pub id: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub items: Vec<GuideItem>,
}

const fn item(title: &'static str, body: &'static str) -> GuideItem {
    GuideItem { title, body, callout: None }
}

pub const INTRO: &str = "This guide summarizes the criteria Google appears to consider for its AI Overviews \
(formerly Search Generative Experience). AI Overviews provide quick, summarized answers at the top of search \
results for certain queries. Google has not published an exhaustive list; this is based on announcements, \
observed behavior and stated goals.";

/// All guide sections in display order.
pub fn sections() -> Vec<GuideSection> {
    vec![
        GuideSection {
            id: "when",
            title: "When Might an AI Overview Appear?",
            summary: "The types of queries and conditions that are more likely to trigger an AI Overview.",
            items: vec![
                item(
                    "Query Complexity & Intent",
                    "Informational queries (how to do something, pros and cons, explanations) and multi-faceted \
                     questions that need information synthesized from several pages are good candidates. Simple \
                     navigational queries or narrow transactional queries may not trigger an overview.",
                ),
                GuideItem {
                    title: "Availability of High-Quality Information",
                    body: "The AI needs sufficient, reliable information from the web. If the topic is too niche, \
                           brand new or lacks credible sources, an overview might not be generated.",
                    callout: Some((
                        Callout::Info,
                        "Tip: Ensure your topic is well-covered by reputable sources if you hope for an AI Overview to draw from it.",
                    )),
                },
                GuideItem {
                    title: "Google's Confidence in Generating a Helpful Summary",
                    body: "If the models can give a coherent, accurate and helpful summary without oversimplifying \
                           or misrepresenting a complex topic, an overview is more likely.",
                    callout: Some((
                        Callout::Warning,
                        "Note: This is an area Google is actively working on, especially after early inaccurate or unhelpful overviews.",
                    )),
                },
                item(
                    "Topic Sensitivity (YMYL - Your Money Your Life)",
                    "For health, finance, safety and legal topics Google is more cautious. Overviews can appear but \
                     face stricter quality thresholds and apply E-E-A-T principles.",
                ),
                item(
                    "Policy Compliance",
                    "Overviews are not generated for queries or topics that violate Google's policies, such as \
                     dangerous, hateful or sexually explicit content.",
                ),
            ],
        },
        GuideSection {
            id: "content",
            title: "What Content is Used Within an AI Overview?",
            summary: "Factors influencing the selection and presentation of information within the summary.",
            items: vec![
                item("Relevance to the Query", "The AI selects content that directly addresses the search query."),
                GuideItem {
                    title: "Quality and Authoritativeness (E-E-A-T)",
                    body: "Information from high-quality, authoritative and trustworthy sources is prioritized. \
                           Content from established experts, reputable organizations and well-regarded \
                           publications is more likely to be featured.",
                    callout: Some((Callout::Success, "Focus: Demonstrating E-E-A-T in your content is key!")),
                },
                item(
                    "Corroboration",
                    "Information corroborated across multiple reliable sources is preferred, reducing the risk of \
                     misinformation.",
                ),
                item(
                    "Freshness/Timeliness",
                    "Where current information matters (news, recent events, fast-moving tech), up-to-date content \
                     is favoured.",
                ),
                item(
                    "Clarity and Conciseness",
                    "Well-written, easy to understand content that gets to the point is easier to summarize: \
                     scannable structure, clear headings and direct answers.",
                ),
                item(
                    "Perspective (when appropriate)",
                    "For some queries the AI synthesizes sources offering different perspectives to give a rounded \
                     overview.",
                ),
                item(
                    "Attribution",
                    "AI Overviews link to the pages they draw from, which is where your content gains visibility.",
                ),
            ],
        },
        GuideSection {
            id: "considerations",
            title: "Important Considerations",
            summary: "Google aims for AI Overviews to be helpful, high-quality, based on the best information \
                      available, and mindful of query intent and topic sensitivity.",
            items: vec![
                item(
                    "It's Evolving",
                    "Models, quality thresholds and triggering queries are refined continuously.",
                ),
                item(
                    "Not a Replacement for Web Pages",
                    "Overviews supplement traditional results; the links to source pages are a critical part of \
                     the experience.",
                ),
                item(
                    "Potential for Errors",
                    "Like all generative AI, overviews can be inaccurate, biased or hallucinated. Stay a critical \
                     reader.",
                ),
            ],
        },
    ]
}
