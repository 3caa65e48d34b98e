//! Research projects section loader.
//!
//! Same fetch-render-fallback shape as the publications loader, minus the
//! display cap, the show-more entry, and the footer. The fallback renders
//! without a cached-data notice; the asymmetry with publications is kept
//! as the page has always behaved.

use crate::fetch::{LoadError, ResourceFetcher};
use crate::markup::{Element, Node};
use crate::model::{Project, ProjectsDocument};
use crate::page::{Container, Page, RESEARCH_ROW_SELECTOR};

use super::LoadOutcome;

/// Resource path, relative to the site directory.
pub const PROJECTS_RESOURCE: &str = "research-projects.json";

pub struct ResearchProjectList {
    container: Option<Container>,
    resource_path: String,
}

impl ResearchProjectList {
    pub fn new(container: Option<Container>, resource_path: impl Into<String>) -> Self {
        ResearchProjectList {
            container,
            resource_path: resource_path.into(),
        }
    }

    /// Bind against the page's research region.
    pub fn bind(page: &Page) -> Self {
        Self::new(page.query(RESEARCH_ROW_SELECTOR), PROJECTS_RESOURCE)
    }

    /// Run one full fetch-render cycle. Every record renders; there is no
    /// cap. Returns `None` when the region is missing.
    pub async fn load(&self, fetcher: &impl ResourceFetcher) -> Option<LoadOutcome> {
        let Some(container) = self.container.as_ref() else {
            tracing::error!("research projects container not found");
            return None;
        };

        container.replace_children(vec![loading_placeholder()]);

        match self.fetch_document(fetcher).await {
            Ok(doc) => {
                display_projects(container, &doc.projects);
                Some(LoadOutcome::Loaded)
            }
            Err(err) => {
                tracing::error!("error loading research projects: {err}");
                display_projects(container, &fallback_projects());
                Some(LoadOutcome::Fallback)
            }
        }
    }

    async fn fetch_document(
        &self,
        fetcher: &impl ResourceFetcher,
    ) -> Result<ProjectsDocument, LoadError> {
        let bytes = fetcher.fetch(&self.resource_path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn display_projects(container: &Container, projects: &[Project]) {
    container.replace_children(projects.iter().map(project_entry).collect());
}

/// One project block: icon glyph, title, description, technologies line.
/// Institution and period stay data-only.
fn project_entry(project: &Project) -> Node {
    Element::new("div")
        .class("row")
        .child(
            Element::new("div").class("col-md-12").child(
                Element::new("div").class("research-project").child(
                    Element::new("div")
                        .class("project-content")
                        .child(
                            Element::new("div")
                                .class("project-icon")
                                .child(Element::new("i").class(&project.icon)),
                        )
                        .child(
                            Element::new("div")
                                .class("project-details")
                                .child(Element::new("h2").text(&project.title))
                                .child(
                                    Element::new("p")
                                        .class("project-description")
                                        .text(&project.description),
                                )
                                .child(
                                    Element::new("p")
                                        .class("project-tech")
                                        .child(Element::new("strong").text("Technologies:"))
                                        .child(Node::text(" "))
                                        .child(Element::new("strong").text(&project.technologies)),
                                ),
                        ),
                ),
            ),
        )
        .into()
}

fn loading_placeholder() -> Node {
    Element::new("div")
        .class("col-md-12")
        .child(
            Element::new("div")
                .class("research-loading")
                .child(Element::new("div").class("loading-spinner"))
                .child(Element::new("p").text("Loading research projects...")),
        )
        .into()
}

/// Embedded records rendered when the fetch fails.
pub fn fallback_projects() -> Vec<Project> {
    let record = |title: &str,
                  institution: &str,
                  period: &str,
                  description: &str,
                  technologies: &str,
                  icon: &str| Project {
        title: title.to_string(),
        institution: institution.to_string(),
        period: period.to_string(),
        description: description.to_string(),
        technologies: technologies.to_string(),
        icon: icon.to_string(),
    };

    vec![
        record(
            "LLM-driven Molecular Structure Elucidation",
            "Stony Brook University",
            "Oct 2023 - Present",
            "Developing novel Large Language Models to predict molecular structures from mass spectrometry data using chain-of-thought reasoning. Implementing multi-stage training architecture (SFT, Reward Modeling, RL) inspired by state-of-the-art LLMs like DeepSeek-R1.",
            "Large Language Models, Reinforcement Learning, Chain of Thought, SMILES/InChI",
            "flaticon-seo",
        ),
        record(
            "Multi-modal LLM for Materials Informatics",
            "Stony Brook University",
            "Oct 2023 - Present",
            "Fine-tuned YOLOv8 and LLAMA3 models to extract molecular information from scientific literature and predict electrochemical properties using Graph Neural Networks. Achieved R² coefficient exceeding 99.1% in property prediction.",
            "Multi-modal LLMs, YOLOv8, LLAMA3, Graph Neural Networks, DFT",
            "flaticon-development",
        ),
        record(
            "Variational Transformer for Quantum Systems",
            "Stony Brook University",
            "May 2024 - Dec 2024",
            "Proposed and developed a novel transformer density operator ansatz to efficiently model steady states of dissipative quantum systems. Validated on dissipative Ising model with high accuracy.",
            "Transformer Architecture, Quantum Computing, Variational Methods",
            "flaticon-process",
        ),
        record(
            "Diffusion Models for X-ray Spectroscopy",
            "Brookhaven National Laboratory",
            "Mar 2023 - Present",
            "Constructed extensive database of X-ray Absorption Spectra and protein structures. Developing diffusion model-based multi-modal approach to reconstruct protein structures from XAS spectra.",
            "Diffusion Models, Computer Vision, Graph Neural Networks, X-ray Spectroscopy",
            "flaticon-discuss-issue",
        ),
        record(
            "AI-enabled Cardiac MRI Interpretation",
            "Stanford University",
            "Mar 2022 - Jul 2023",
            "Developed large vision model-based deep learning pipelines for heart disease diagnosis. Achieved over 99% accuracy in cardiac anomaly detection, surpassing human performance benchmarks.",
            "Computer Vision, Deep Learning, Medical Imaging, Large Vision Models",
            "flaticon-idea",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_renders_icon_title_description_technologies() {
        let project = Project {
            title: "Edge Inference".into(),
            institution: "Example University".into(),
            period: "2024".into(),
            description: "On-device model serving.".into(),
            technologies: "Rust, ONNX".into(),
            icon: "flaticon-development".into(),
        };

        let html = project_entry(&project).to_html();
        assert!(html.contains("<i class=\"flaticon-development\"></i>"));
        assert!(html.contains("<h2>Edge Inference</h2>"));
        assert!(html.contains("<p class=\"project-description\">On-device model serving.</p>"));
        assert!(html.contains("<strong>Technologies:</strong> <strong>Rust, ONNX</strong>"));
    }

    #[test]
    fn institution_and_period_are_not_rendered() {
        let project = &fallback_projects()[0];
        let html = project_entry(project).to_html();
        assert!(!html.contains(&project.institution));
        assert!(!html.contains(&project.period));
    }

    #[test]
    fn fallback_sequence_has_five_records() {
        assert_eq!(fallback_projects().len(), 5);
    }

    #[test]
    fn display_renders_every_record() {
        let container = Container::new();
        display_projects(&container, &fallback_projects());
        assert_eq!(container.child_count(), 5);
    }
}
