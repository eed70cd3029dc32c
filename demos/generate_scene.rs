//! Basic scene generation demo.
//!
//! Run with: `cargo run --example generate_scene`
//!
//! Requires `VERTEX_AI_PROJECT` and gcloud auth (or an explicit token).

use bookscene::{
    compose_prompt, GenerationRequest, ImageProvider, ImagenProvider, StyleOptions,
};

#[tokio::main]
async fn main() -> bookscene::Result<()> {
    let options = StyleOptions::new()
        .with_art_style("수채화 일러스트")
        .with_mood("어둡고 미스터리한")
        .with_era("중세 판타지");

    let prompt = compose_prompt("촛불이 허공에 떠 있는 고딕풍 연회장.", &options);
    println!("Prompt: {prompt}");

    let provider = ImagenProvider::builder().build()?;
    let images = provider.generate(&GenerationRequest::new(prompt)).await?;

    images[0].save("scene.png")?;
    println!(
        "Generated image: {} bytes, format: {:?}",
        images[0].size(),
        images[0].format
    );

    Ok(())
}
