//! Server-rendered prediction form.
//!
//! `GET /` renders the form pre-filled with defaults. `POST /predict` renders
//! the same form with the submitted values and either the formatted
//! prediction or the reason it failed. When the model never loaded, the
//! form is shown with the predict button disabled.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use anipv_core::{
    format_views, FeatureDomain, FeatureInput, FeatureRow, FeatureSpec, FEATURE_SPECS, VIEW_UNIT,
};
use anipv_model::ModelState;
use axum::{
    extract::{rejection::FormRejection, State},
    response::Html,
    Extension, Form,
};

use crate::api::AppState;
use crate::middleware::RequestId;

const GROUPS: [&str; 3] = [
    anipv_core::schema::GROUP_BASIC,
    anipv_core::schema::GROUP_ENGAGEMENT,
    anipv_core::schema::GROUP_TOPICS,
];

const STYLE: &str = "\
body{font-family:sans-serif;max-width:1100px;margin:0 auto;padding:1rem 1rem 4rem}\
.columns{display:flex;gap:1.5rem;flex-wrap:wrap}\
fieldset{flex:1;min-width:260px;border:1px solid #ddd;border-radius:6px}\
label{display:block;margin-top:.6rem;font-weight:600}\
small{display:block;color:#666;font-weight:normal}\
select,input[type=number]{width:100%;padding:.3rem}\
input[type=range]{width:80%}\
.banner{padding:.8rem;border-radius:6px;margin:1rem 0}\
.ok{background:#e6f4ea;color:#1e4620}\
.err{background:#fdecea;color:#611a15}\
button{margin-top:1rem;padding:.6rem 1.2rem;font-size:1rem}\
.footer{position:fixed;left:0;bottom:0;width:100%;background:#f0f2f6;color:gray;\
text-align:center;padding:10px;font-size:12px}";

/// Result line shown under the form after a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Predicted(f64),
    Failed(String),
}

/// Raw form values keyed by column name, as they appear in the inputs.
pub type FormValues = BTreeMap<&'static str, String>;

/// GET /: empty form with default values.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_page(
        &state.model,
        &form_values(&FeatureInput::default()),
        None,
    ))
}

/// POST /predict: validate the submitted form, predict, re-render.
pub async fn submit(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Html<String> {
    let (values, outcome) = match form {
        Ok(Form(pairs)) => {
            let (values, parsed) = parse_submission(&pairs);
            let outcome = match parsed {
                Ok(input) => predict_outcome(&state.model, &input, &req_id.0),
                Err(e) => Some(Outcome::Failed(format!("invalid form submission: {e}"))),
            };
            (values, outcome)
        }
        Err(rejection) => (
            form_values(&FeatureInput::default()),
            Some(Outcome::Failed(format!(
                "invalid form submission, values reset to defaults: {rejection}"
            ))),
        ),
    };
    Html(render_page(&state.model, &values, outcome.as_ref()))
}

/// Overlay the submitted pairs on the defaults.
///
/// Every recognised value is kept for re-display, even when it fails to
/// parse. Unknown names are ignored. The first parse failure is returned.
fn parse_submission(pairs: &[(String, String)]) -> (FormValues, Result<FeatureInput, String>) {
    let mut input = FeatureInput::default();
    let mut values = form_values(&input);
    let mut error = None;

    for (name, raw) in pairs {
        let Some(spec) = FEATURE_SPECS.iter().find(|s| s.name == name.as_str()) else {
            continue;
        };
        values.insert(spec.name, raw.clone());
        if let Err(e) = set_field(&mut input, spec.name, raw.trim()) {
            error.get_or_insert(e);
        }
    }

    (values, error.map_or(Ok(input), Err))
}

fn set_field(input: &mut FeatureInput, name: &str, raw: &str) -> Result<(), String> {
    let int = || {
        raw.parse::<i64>()
            .map_err(|_| format!("{name}: expected an integer, got '{raw}'"))
    };
    let float = || {
        raw.parse::<f64>()
            .map_err(|_| format!("{name}: expected a number, got '{raw}'"))
    };

    match name {
        "type" => input.anime_type = int()?,
        "is_adapted" => input.is_adapted = int()?,
        "air_time" => input.air_time = int()?,
        "is_exclusive" => input.is_exclusive = int()?,
        "origin" => input.origin = int()?,
        "episode_count" => input.episode_count = int()?,
        "likes" => input.likes = int()?,
        "coins" => input.coins = int()?,
        "collects" => input.collects = int()?,
        "shares" => input.shares = int()?,
        "topic_0" => input.topic_0 = float()?,
        "topic_1" => input.topic_1 = float()?,
        "topic_2" => input.topic_2 = float()?,
        "topic_3" => input.topic_3 = float()?,
        "topic_4" => input.topic_4 = float()?,
        _ => {}
    }
    Ok(())
}

/// One prediction per submission. `None` when there is no model to ask.
fn predict_outcome(state: &ModelState, input: &FeatureInput, request_id: &str) -> Option<Outcome> {
    let model = state.model()?;
    let outcome = match FeatureRow::try_from(input) {
        Ok(row) => match model.predict(&row) {
            Ok(value) => Outcome::Predicted(value),
            Err(e) => {
                tracing::warn!(request_id, error = %e, "prediction failed");
                Outcome::Failed(format!("prediction failed: {e}"))
            }
        },
        Err(e) => Outcome::Failed(format!("invalid input: {e}")),
    };
    Some(outcome)
}

pub fn render_page(state: &ModelState, values: &FormValues, outcome: Option<&Outcome>) -> String {
    let mut html = String::with_capacity(8 * 1024);
    html.push_str("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">");
    html.push_str("<title>Anime Total-View Predictor</title>");
    let _ = write!(html, "<style>{STYLE}</style></head><body>");

    html.push_str("<h1>📊 Anime Total-View Predictor</h1>");
    html.push_str(
        "<p>Enter the descriptors of an anime title below. A pre-trained random forest \
         model predicts its expected total views, in units of ten thousand (万).</p>",
    );

    if let Some(e) = state.failure() {
        let _ = write!(
            html,
            "<div class=\"banner err\">❌ Model unavailable: {}. Prediction is disabled.</div>",
            escape(&e.to_string())
        );
    }

    html.push_str("<form method=\"post\" action=\"/predict\"><div class=\"columns\">");
    for group in GROUPS {
        let _ = write!(html, "<fieldset><legend>{}</legend>", escape(group));
        for spec in FEATURE_SPECS.iter().filter(|s| s.group == group) {
            let current = values.get(spec.name).map_or("", String::as_str);
            render_field(&mut html, spec, current);
        }
        html.push_str("</fieldset>");
    }
    html.push_str("</div>");

    if state.is_loaded() {
        html.push_str("<button type=\"submit\">Predict total views</button>");
    } else {
        html.push_str("<button type=\"submit\" disabled>Predict total views</button>");
    }
    html.push_str("</form>");

    match outcome {
        Some(Outcome::Predicted(value)) => {
            let _ = write!(
                html,
                "<div class=\"banner ok\">🎉 Predicted total views: <strong>{} {VIEW_UNIT}</strong>\
                 <small>Computed from the values above by the random forest model.</small></div>",
                format_views(*value)
            );
        }
        Some(Outcome::Failed(message)) => {
            let _ = write!(
                html,
                "<div class=\"banner err\">❌ {}</div>",
                escape(message)
            );
        }
        None => {}
    }

    html.push_str(FEATURE_NOTES);
    html.push_str("<div class=\"footer\">Random forest anime total-view predictor</div>");
    html.push_str("</body></html>");
    html
}

const FEATURE_NOTES: &str = "<hr><h3>About the features</h3><ul>\
<li><b>Genre, origin:</b> preprocessed category codes.</li>\
<li><b>Adapted, premiere window, platform exclusive:</b> binary flags; 1 means yes \
(for the premiere window, 1 means a holiday-season premiere).</li>\
<li><b>Episodes:</b> total episode count.</li>\
<li><b>Likes / coins / collects / shares (PV):</b> cumulative interaction counts on the platform.</li>\
<li><b>Topic 0-4:</b> topic-model weights extracted upstream from the synopsis or tags, \
describing how strongly the title leans toward each topic.</li></ul>";

fn render_field(html: &mut String, spec: &FeatureSpec, current: &str) {
    let name = spec.name;
    let _ = write!(
        html,
        "<label for=\"{name}\">{}<small>{}</small></label>",
        escape(spec.label),
        escape(spec.help)
    );

    match spec.domain {
        FeatureDomain::Choice { options, .. } => {
            let _ = write!(html, "<select id=\"{name}\" name=\"{name}\">");
            for choice in options {
                let value = choice.value.to_string();
                let selected = if value == current { " selected" } else { "" };
                let _ = write!(
                    html,
                    "<option value=\"{value}\"{selected}>{}</option>",
                    escape(choice.label)
                );
            }
            html.push_str("</select>");
        }
        FeatureDomain::Integer { min, max, .. } => {
            let max_attr = max.map(|m| format!(" max=\"{m}\"")).unwrap_or_default();
            let _ = write!(
                html,
                "<input type=\"number\" id=\"{name}\" name=\"{name}\" min=\"{min}\"{max_attr} \
                 step=\"1\" value=\"{}\" required>",
                escape(current)
            );
        }
        FeatureDomain::Weight { min, max, step, .. } => {
            let _ = write!(
                html,
                "<input type=\"range\" id=\"{name}\" name=\"{name}\" min=\"{min}\" max=\"{max}\" \
                 step=\"{step}\" value=\"{cur}\" oninput=\"this.nextElementSibling.value=this.value\">\
                 <output>{cur}</output>",
                cur = escape(current)
            );
        }
    }
}

fn form_values(input: &FeatureInput) -> FormValues {
    FEATURE_SPECS
        .iter()
        .map(|spec| (spec.name, field_value(input, spec.name)))
        .collect()
}

/// Current raw value of one column, as it should appear in the form.
fn field_value(input: &FeatureInput, name: &str) -> String {
    match name {
        "type" => input.anime_type.to_string(),
        "is_adapted" => input.is_adapted.to_string(),
        "air_time" => input.air_time.to_string(),
        "is_exclusive" => input.is_exclusive.to_string(),
        "origin" => input.origin.to_string(),
        "episode_count" => input.episode_count.to_string(),
        "likes" => input.likes.to_string(),
        "coins" => input.coins.to_string(),
        "collects" => input.collects.to_string(),
        "shares" => input.shares.to_string(),
        "topic_0" => input.topic_0.to_string(),
        "topic_1" => input.topic_1.to_string(),
        "topic_2" => input.topic_2.to_string(),
        "topic_3" => input.topic_3.to_string(),
        "topic_4" => input.topic_4.to_string(),
        _ => String::new(),
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
