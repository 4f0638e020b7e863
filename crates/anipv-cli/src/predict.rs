//! `predict` subcommand: build one feature row from flags and query the model.

use std::path::PathBuf;

use anipv_core::{
    format_views, FeatureInput, FeatureRow, DEFAULT_MODEL_PATH, TOPIC_COUNT, VIEW_UNIT,
};
use anipv_model::{Model, ModelState};
use clap::Args;

/// Flags default to the values the prediction form is pre-filled with.
#[derive(Debug, Args)]
pub struct PredictArgs {
    /// Path to the model artifact
    #[arg(long, env = "ANIPV_MODEL_PATH", default_value = DEFAULT_MODEL_PATH)]
    pub model: PathBuf,

    /// Genre code: 1 children/education, 2 fantasy/adventure, 3 romance/slice of life,
    /// 4 suspense/thriller, 5 literary/historical
    #[arg(long = "type", default_value_t = 1)]
    pub anime_type: i64,

    /// 1 if adapted from a manga, novel or other source
    #[arg(long, default_value_t = 0)]
    pub adapted: i64,

    /// 1 for a holiday-season premiere (Jan, Feb, Jul, Aug)
    #[arg(long, default_value_t = 0)]
    pub air_time: i64,

    /// 1 if the title is platform exclusive
    #[arg(long, default_value_t = 0)]
    pub exclusive: i64,

    /// Origin code: 1 Japan, 2 United States, 3 China
    #[arg(long, default_value_t = 1)]
    pub origin: i64,

    /// Total episode count (1-500)
    #[arg(long, default_value_t = 12)]
    pub episodes: i64,

    #[arg(long, default_value_t = 50_000)]
    pub likes: i64,

    #[arg(long, default_value_t = 20_000)]
    pub coins: i64,

    #[arg(long, default_value_t = 10_000)]
    pub collects: i64,

    #[arg(long, default_value_t = 5_000)]
    pub shares: i64,

    /// Five comma-separated topic weights in [0, 1]
    #[arg(
        long,
        value_delimiter = ',',
        default_values_t = [0.1, 0.1, 0.1, 0.1, 0.1]
    )]
    pub topics: Vec<f64>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

impl PredictArgs {
    /// Collect the flags into a raw feature input.
    ///
    /// # Errors
    ///
    /// Returns an error unless exactly five topic weights were given.
    pub fn to_input(&self) -> anyhow::Result<FeatureInput> {
        let topics: [f64; TOPIC_COUNT] = self.topics.as_slice().try_into().map_err(|_| {
            anyhow::anyhow!(
                "--topics takes {TOPIC_COUNT} comma-separated weights, got {}",
                self.topics.len()
            )
        })?;

        let mut input = FeatureInput {
            anime_type: self.anime_type,
            is_adapted: self.adapted,
            air_time: self.air_time,
            is_exclusive: self.exclusive,
            origin: self.origin,
            episode_count: self.episodes,
            likes: self.likes,
            coins: self.coins,
            collects: self.collects,
            shares: self.shares,
            ..FeatureInput::default()
        };
        input.set_topics(topics);
        Ok(input)
    }
}

/// Validate the flags and predict with an already-loaded model.
pub(crate) fn predict_value(model: &Model, args: &PredictArgs) -> anyhow::Result<f64> {
    let input = args.to_input()?;
    let row = FeatureRow::try_from(&input)?;
    let value = model.predict(&row)?;
    Ok(value)
}

/// Load the model once, predict, and print the result.
pub(crate) fn run_predict(args: &PredictArgs) -> anyhow::Result<()> {
    tracing::debug!(model = %args.model.display(), "running predict");
    let state = ModelState::load(&args.model);
    let Some(model) = state.model() else {
        anyhow::bail!(
            "model unavailable, prediction disabled: {}",
            state
                .failure()
                .map_or_else(|| "not loaded".to_string(), ToString::to_string)
        );
    };

    let value = predict_value(model, args)?;
    let formatted = format_views(value);

    if args.json {
        let out = serde_json::json!({
            "prediction": value,
            "formatted": formatted,
            "unit": VIEW_UNIT,
        });
        println!("{out}");
    } else {
        println!("Predicted total views: {formatted} {VIEW_UNIT}");
    }
    Ok(())
}
