/// One of the fixed article categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArticleCategory {
    /// Slug used in the `category` query parameter
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

const CATEGORIES: [ArticleCategory; 4] = [
    ArticleCategory {
        id: "dinh-duong",
        name: "Dinh Dưỡng",
        description: "Chế độ ăn uống lành mạnh cho mẹ và bé",
    },
    ArticleCategory {
        id: "suc-khoe",
        name: "Sức Khỏe",
        description: "Theo dõi sức khỏe thai kỳ",
    },
    ArticleCategory {
        id: "tam-ly",
        name: "Tâm Lý",
        description: "Chăm sóc sức khỏe tinh thần",
    },
    ArticleCategory {
        id: "van-dong",
        name: "Vận Động",
        description: "Bài tập thể dục an toàn",
    },
];

impl ArticleCategory {
    pub fn all() -> &'static [ArticleCategory] {
        &CATEGORIES
    }

    pub fn find(id: &str) -> Option<&'static ArticleCategory> {
        CATEGORIES.iter().find(|c| c.id == id)
    }
}

/// Display name for a category slug; unknown slugs are shown as-is
pub fn category_display_name(id: &str) -> &str {
    ArticleCategory::find(id).map(|c| c.name).unwrap_or(id)
}
