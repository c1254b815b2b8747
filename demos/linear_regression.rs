//! Linear regression example: fit `y = 2x + 1` with a little noise using the
//! local Candle backend, then predict an unseen point.
//!
//! Run with:
//! ```sh
//! cargo run --example linear_regression
//! ```

use ai_megarepo::config::Settings;
use ai_megarepo::provider::CandleHelper;

/// Fixed jitter in [-0.25, 0.25] so runs are repeatable.
const NOISE: [f32; 10] = [0.12, -0.08, 0.21, -0.17, 0.03, -0.24, 0.15, -0.02, 0.09, -0.11];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    println!("Running linear regression example");

    let settings = Settings::from_env()?;
    let helper = CandleHelper::new(&settings);
    helper.initialize().await?;

    // 1. Sample data: y = 2x + 1 + noise
    let xs: Vec<f32> = (1..=10).map(|x| x as f32).collect();
    let ys: Vec<f32> = xs
        .iter()
        .zip(NOISE)
        .map(|(x, noise)| 2.0 * x + 1.0 + noise)
        .collect();
    println!("Training data: xs={xs:?}");
    println!("               ys={ys:?}");

    // 2. Train
    let model = helper.train_simple_model(&xs, &ys).await?;
    let (weight, bias) = model.parameters()?;
    println!("Learned weight={weight:.3} bias={bias:.3}");

    // 3. Predict
    let test_input = 11.0;
    let prediction = helper.predict(&model, test_input)?;
    println!("Prediction for x={test_input}: {prediction:.2}");
    println!("Expected (2*11+1): {}", 2.0 * test_input + 1.0);

    Ok(())
}
