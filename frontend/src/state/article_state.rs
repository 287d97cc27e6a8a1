use shared::Article;
use tracing::{error, info, warn};

use crate::domain::articles::category_display_name;
use crate::services::api::PregnancyApi;
use crate::services::session::SessionContext;

/// Articles listed for one category
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticleListState {
    pub category: String,
    pub articles: Vec<Article>,
}

impl ArticleListState {
    /// Fetch the category's articles. Any failure leaves the list empty.
    pub async fn load(api: &dyn PregnancyApi, session: &SessionContext, category: &str) -> Self {
        let mut state = Self {
            category: category.to_string(),
            articles: Vec::new(),
        };

        let Some(token) = session.token().await else {
            warn!("Listing articles without a session, showing none");
            return state;
        };

        match api.articles(&token, category).await {
            Ok(articles) => {
                info!("📚 Loaded {} articles for {}", articles.len(), category);
                state.articles = articles;
            }
            Err(e) => error!("Failed to load articles for {}: {}", category, e),
        }
        state
    }

    pub fn title(&self) -> &str {
        category_display_name(&self.category)
    }

    pub fn count(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// "N bài viết"
    pub fn count_label(&self) -> String {
        format!("{} bài viết", self.count())
    }

    /// Address opened by the article detail view
    pub fn detail_url(article: &Article) -> &str {
        &article.content
    }
}
