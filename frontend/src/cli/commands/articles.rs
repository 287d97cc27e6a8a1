//! Article catalog handlers

use anyhow::{bail, Result};
use me_bau::domain::articles::ArticleCategory;
use me_bau::services::date_utils::format_service_timestamp;
use me_bau::state::ArticleListState;

use super::Context;

pub async fn run(ctx: &Context, category: Option<String>) -> Result<()> {
    match category {
        None => {
            list_categories();
            Ok(())
        }
        Some(id) => list_articles(ctx, &id).await,
    }
}

fn list_categories() {
    println!("\n=== Chuyên mục ===\n");
    for category in ArticleCategory::all() {
        println!("{:<12} {:<12} {}", category.id, category.name, category.description);
    }
}

async fn list_articles(ctx: &Context, id: &str) -> Result<()> {
    if ArticleCategory::find(id).is_none() {
        bail!("Không có chuyên mục '{id}'");
    }

    let state = ArticleListState::load(&ctx.api, &ctx.session, id).await;
    println!("\n=== {} ({}) ===\n", state.title(), state.count_label());
    if state.is_empty() {
        println!("Chưa có bài viết nào");
        return Ok(());
    }
    for article in &state.articles {
        println!("• {}", article.title);
        if !article.author.is_empty() {
            println!("  {} · {}", article.author, format_service_timestamp(&article.created_at));
        }
        println!("  {}", ArticleListState::detail_url(article));
    }
    Ok(())
}
