use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: i32,
    pub name: String,
    /// 读取时实时计算，不落库
    #[serde(default)]
    pub bookmark_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFolder {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: i32,
    pub title: String,
    pub url: String,
    pub folder_id: Option<i32>,
    pub favicon: Option<String>,
}

impl Bookmark {
    /// 标题或 URL 包含搜索词（只折叠 ASCII 大小写，与 SQLite 的 LOWER/LIKE 一致）
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_ascii_lowercase();
        self.title.to_ascii_lowercase().contains(&term)
            || self.url.to_ascii_lowercase().contains(&term)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewBookmark {
    pub title: String,
    pub url: String,
    pub folder_id: Option<i32>,
    pub favicon: Option<String>,
}

/// 书签的部分更新
///
/// `None` 表示保持原值；可空字段用 `Some(None)` 清空。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BookmarkPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub folder_id: Option<Option<i32>>,
    pub favicon: Option<Option<String>>,
}

impl BookmarkPatch {
    pub fn apply(self, bookmark: &mut Bookmark) {
        if let Some(title) = self.title {
            bookmark.title = title;
        }
        if let Some(url) = self.url {
            bookmark.url = url;
        }
        if let Some(folder_id) = self.folder_id {
            bookmark.folder_id = folder_id;
        }
        if let Some(favicon) = self.favicon {
            bookmark.favicon = favicon;
        }
    }

    /// 本次更新要指向的文件夹（需要做引用检查）
    pub fn target_folder(&self) -> Option<i32> {
        self.folder_id.flatten()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkWithFolder {
    #[serde(flatten)]
    pub bookmark: Bookmark,
    pub folder_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}
