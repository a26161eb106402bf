use yew::prelude::*;

use crate::routes::LearningTrack;

fn intro(track: LearningTrack) -> &'static str {
    match track {
        LearningTrack::Microservices => {
            "Explore the world of microservices architecture and how to build scalable, distributed systems."
        }
        LearningTrack::GenAi => {
            "Discover the latest techniques in generative AI and how to integrate them into your applications."
        }
    }
}

fn topics(track: LearningTrack) -> &'static [&'static str] {
    match track {
        LearningTrack::Microservices => &[
            "Service discovery and registry",
            "API gateways and communication patterns",
            "Containerization with Docker",
            "Orchestration with Kubernetes",
            "Event-driven architecture",
        ],
        LearningTrack::GenAi => &[
            "Transformer architectures",
            "Large Language Models (LLMs)",
            "Prompt engineering",
            "Retrieval-Augmented Generation (RAG)",
            "Fine-tuning and evaluation",
        ],
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct LearningProps {
    pub track: LearningTrack,
}

#[function_component(LearningPage)]
pub fn learning_page(props: &LearningProps) -> Html {
    html! {
        <main class="page">
            <div class="hero">
                <h1>{ format!("{} Learning Path", props.track.label()) }</h1>
                <p>{ intro(props.track) }</p>
            </div>
            <div class="card">
                <h2>{ "Topics Covered" }</h2>
                <ul style="margin: 0; padding-left: 20px; line-height: 1.9;">
                    { for topics(props.track).iter().map(|t| html! { <li>{ *t }</li> }) }
                </ul>
            </div>
        </main>
    }
}
