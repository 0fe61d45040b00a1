//! Analysis Page

use leptos::prelude::*;

use crate::api::{self, AnalysisForm};
use crate::components::LabeledInput;

#[component]
pub fn AnalysisPage() -> impl IntoView {
    let (cryptocurrency, set_cryptocurrency) = signal(String::new());
    let (openai_key, set_openai_key) = signal(String::new());
    let (serp_key, set_serp_key) = signal(String::new());
    let (output, set_output) = signal(String::new());
    let (finished_at, set_finished_at) = signal(None::<String>);
    let (loading, set_loading) = signal(false);

    let analyze = move |_| {
        if loading.get() {
            return;
        }

        let form = AnalysisForm {
            cryptocurrency: cryptocurrency.get(),
            openai_api_key: openai_key.get(),
            serp_api_key: serp_key.get(),
        };

        set_loading.set(true);
        set_output.set(String::new());
        set_finished_at.set(None);

        leptos::task::spawn_local(async move {
            let text = match api::run_analysis(&form).await {
                Ok(report) => report,
                Err(e) => e,
            };
            set_output.set(text);
            set_finished_at.set(Some(chrono::Local::now().format("%H:%M:%S").to_string()));
            set_loading.set(false);
        });
    };

    view! {
        <div class="analysis">
            <h1>"Crypto Analysis Crew"</h1>
            <p class="description">
                "Enter the cryptocurrency you want to analyze along with your OpenAI and SERP API keys."
            </p>

            <div class="form">
                <LabeledInput
                    label="Cryptocurrency"
                    placeholder="Bitcoin"
                    value=cryptocurrency
                    set_value=set_cryptocurrency
                />
                <LabeledInput
                    label="OpenAI API Key"
                    input_type="password"
                    value=openai_key
                    set_value=set_openai_key
                />
                <LabeledInput
                    label="SERP API Key"
                    input_type="password"
                    value=serp_key
                    set_value=set_serp_key
                />

                <button on:click=analyze disabled=move || loading.get()>
                    {move || if loading.get() { "Analyzing..." } else { "Analyze" }}
                </button>
            </div>

            <div class="output">
                <label>"Result"</label>
                <textarea readonly=true rows="24" prop:value=move || output.get() />
                <Show when=move || finished_at.get().is_some()>
                    <p class="meta">{move || format!("Completed at {}", finished_at.get().unwrap_or_default())}</p>
                </Show>
            </div>
        </div>
    }
}
