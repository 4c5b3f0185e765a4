use serde::{Deserialize, Serialize};

/// A tool listed in the catalog.
///
/// Field names follow the camelCase layout of the persisted record block and
/// of the HTTP API.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    /// Unique identifier, assigned by the catalog on creation.
    pub id: String,
    pub name: String,
    pub description: String,
    /// Platform tags (e.g. `douyin`, `taobao`), in display order.
    pub platforms: Vec<String>,
    /// Category tags. Older records may not carry any.
    #[serde(default)]
    pub categories: Vec<String>,
    pub uploader: String,
    /// Creation date in `YYYY-MM-DD` form.
    pub upload_date: String,
    /// Approximate popularity counter maintained by click tracking.
    pub clicks: u64,
    /// Free-form, possibly multi-line, description.
    pub detailed_description: String,
    pub download_link: String,
    pub original_post_link: String,
    #[serde(default)]
    pub invite_code: String,
    pub screenshots: Vec<String>,
    pub tags: Vec<String>,
}

/// A partial tool used for both creation and updates.
///
/// Every present field overwrites the corresponding field of the target
/// record; absent fields leave it untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToolPatch {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub platforms: Option<Vec<String>>,
    pub categories: Option<Vec<String>>,
    pub uploader: Option<String>,
    pub upload_date: Option<String>,
    pub clicks: Option<u64>,
    pub detailed_description: Option<String>,
    pub download_link: Option<String>,
    pub original_post_link: Option<String>,
    pub invite_code: Option<String>,
    pub screenshots: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
}

impl Tool {
    /// Shallow-merges `patch` into this record.
    ///
    /// The patch `id` is never applied: a record keeps the identity it was
    /// stored under.
    pub fn apply(&mut self, patch: ToolPatch) {
        let ToolPatch {
            id: _,
            name,
            description,
            platforms,
            categories,
            uploader,
            upload_date,
            clicks,
            detailed_description,
            download_link,
            original_post_link,
            invite_code,
            screenshots,
            tags,
        } = patch;

        overwrite(&mut self.name, name);
        overwrite(&mut self.description, description);
        overwrite(&mut self.platforms, platforms);
        overwrite(&mut self.categories, categories);
        overwrite(&mut self.uploader, uploader);
        overwrite(&mut self.upload_date, upload_date);
        overwrite(&mut self.clicks, clicks);
        overwrite(&mut self.detailed_description, detailed_description);
        overwrite(&mut self.download_link, download_link);
        overwrite(&mut self.original_post_link, original_post_link);
        overwrite(&mut self.invite_code, invite_code);
        overwrite(&mut self.screenshots, screenshots);
        overwrite(&mut self.tags, tags);
    }

    /// Returns `true` if the tool carries `tag` as a platform or a category.
    pub fn has_platform_or_category(&self, tag: &str) -> bool {
        self.platforms.iter().any(|p| p == tag) || self.categories.iter().any(|c| c == tag)
    }

    /// Returns `true` if the two tools share at least one platform or category.
    pub fn shares_platform_or_category(&self, other: &Tool) -> bool {
        self.platforms.iter().any(|p| other.platforms.contains(p))
            || self.categories.iter().any(|c| other.categories.contains(c))
    }
}

fn overwrite<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool() -> Tool {
        Tool {
            id: "1".to_string(),
            name: "Shop Helper".to_string(),
            description: "Sets up a storefront".to_string(),
            platforms: vec!["douyin".to_string(), "taobao".to_string()],
            categories: vec!["project_research".to_string()],
            uploader: "admin".to_string(),
            upload_date: "2024-03-01".to_string(),
            clicks: 7,
            detailed_description: "line one\nline two".to_string(),
            download_link: "#".to_string(),
            original_post_link: "#".to_string(),
            invite_code: String::new(),
            screenshots: vec!["/shots/1.png".to_string()],
            tags: vec!["shop".to_string()],
        }
    }

    #[test]
    fn apply_overwrites_only_present_fields() {
        let mut record = tool();
        record.apply(ToolPatch {
            clicks: Some(5),
            ..ToolPatch::default()
        });

        let mut expected = tool();
        expected.clicks = 5;
        assert_eq!(record, expected);
    }

    #[test]
    fn apply_never_changes_id() {
        let mut record = tool();
        record.apply(ToolPatch {
            id: Some("99".to_string()),
            name: Some("Renamed".to_string()),
            ..ToolPatch::default()
        });

        assert_eq!(record.id, "1");
        assert_eq!(record.name, "Renamed");
    }

    #[test]
    fn shares_platform_or_category() {
        let a = tool();
        let mut b = tool();
        b.platforms = vec!["wechat".to_string()];
        assert!(a.shares_platform_or_category(&b));

        b.categories = vec!["image_processing".to_string()];
        assert!(!a.shares_platform_or_category(&b));
    }

    #[test]
    fn deserializes_without_optional_fields() {
        let json = r##"{
            "id": "3",
            "name": "n",
            "description": "d",
            "platforms": ["other"],
            "uploader": "",
            "uploadDate": "2024-01-01",
            "clicks": 0,
            "detailedDescription": "",
            "downloadLink": "#",
            "originalPostLink": "#",
            "screenshots": [],
            "tags": []
        }"##;

        let tool: Tool = serde_json::from_str(json).unwrap();
        assert!(tool.categories.is_empty());
        assert!(tool.invite_code.is_empty());
    }
}
