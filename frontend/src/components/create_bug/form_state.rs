//! 缺陷报告表单状态
//!
//! `BugDraft` 是纯数据结构，不依赖浏览器，负责：
//! - 字段的持有与文件列表的增删
//! - 提交前的校验
//! - 转换为 multipart 请求体
//!
//! 文件句柄类型 `F` 由传输层决定，浏览器中是 `web_sys::File`。

use bugboard_shared::Severity;
use thiserror::Error;

use crate::api::Multipart;

/// 附件字段名，每个文件一个同名字段
pub const ATTACHMENTS_FIELD: &str = "attachments";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Title is required")]
    MissingTitle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BugDraft<F> {
    pub title: String,
    pub description: String,
    pub topic: String,
    pub severity: Severity,
    files: Vec<F>,
}

impl<F> Default for BugDraft<F> {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            topic: String::new(),
            severity: Severity::Medium,
            files: Vec::new(),
        }
    }
}

impl<F> BugDraft<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &[F] {
        &self.files
    }

    /// 多选时追加到已有列表末尾
    pub fn add_files(&mut self, files: impl IntoIterator<Item = F>) {
        self.files.extend(files);
    }

    /// 越界索引忽略
    pub fn remove_file(&mut self, index: usize) -> Option<F> {
        (index < self.files.len()).then(|| self.files.remove(index))
    }

    pub fn validate(&self) -> Result<(), DraftError> {
        if self.title.trim().is_empty() {
            return Err(DraftError::MissingTitle);
        }
        Ok(())
    }
}

impl<F: Clone> BugDraft<F> {
    /// 字段顺序固定：title, description, topic, severity, attachments...
    ///
    /// 文本字段按输入原样发送，空白处理交给后端。
    pub fn to_multipart(&self) -> Result<Multipart<F>, DraftError> {
        self.validate()?;
        let form = Multipart::new()
            .text("title", self.title.as_str())
            .text("description", self.description.as_str())
            .text("topic", self.topic.as_str())
            .text("severity", self.severity.as_str());
        Ok(self
            .files
            .iter()
            .cloned()
            .fold(form, |form, file| form.file(ATTACHMENTS_FIELD, file)))
    }
}

/// 文件大小，以 MB 显示并保留两位小数
pub fn format_size_mb(bytes: f64) -> String {
    format!("{:.2} MB", bytes / (1024.0 * 1024.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Part;

    fn draft(title: &str) -> BugDraft<String> {
        let mut d = BugDraft::new();
        d.title = title.to_string();
        d
    }

    #[test]
    fn test_title_only_draft() {
        let form = draft("Crash on save").to_multipart().unwrap();

        assert_eq!(form.text_value("title"), Some("Crash on save"));
        assert_eq!(form.text_value("description"), Some(""));
        assert_eq!(form.text_value("topic"), Some(""));
        assert_eq!(form.text_value("severity"), Some("medium"));
        assert!(form.files(ATTACHMENTS_FIELD).is_empty());

        let names: Vec<_> = form
            .parts()
            .iter()
            .map(|p| match p {
                Part::Text { name, .. } | Part::File { name, .. } => name.as_str(),
            })
            .collect();
        assert_eq!(names, ["title", "description", "topic", "severity"]);
    }

    #[test]
    fn test_blank_title_is_rejected() {
        assert_eq!(draft("   ").validate(), Err(DraftError::MissingTitle));
        assert_eq!(draft("").to_multipart(), Err(DraftError::MissingTitle));
    }

    #[test]
    fn test_files_accumulate_in_order() {
        let mut d = draft("t");
        d.add_files(["a.png".to_string(), "b.pdf".to_string()]);
        d.add_files(["c.jpg".to_string()]);

        let form = d.to_multipart().unwrap();
        assert_eq!(form.files(ATTACHMENTS_FIELD), ["a.png", "b.pdf", "c.jpg"]);
    }

    #[test]
    fn test_removed_file_is_excluded() {
        let mut d = draft("t");
        d.add_files(["a.png".to_string(), "b.pdf".to_string(), "c.jpg".to_string()]);

        assert_eq!(d.remove_file(1).as_deref(), Some("b.pdf"));
        assert_eq!(d.remove_file(10), None);

        let form = d.to_multipart().unwrap();
        assert_eq!(form.files(ATTACHMENTS_FIELD), ["a.png", "c.jpg"]);
    }

    #[test]
    fn test_text_fields_are_sent_verbatim() {
        let mut d = draft("  Crash on save ");
        d.description = " steps\n".to_string();
        d.topic = " UI ".to_string();

        let form = d.to_multipart().unwrap();
        assert_eq!(form.text_value("title"), Some("  Crash on save "));
        assert_eq!(form.text_value("description"), Some(" steps\n"));
        assert_eq!(form.text_value("topic"), Some(" UI "));
    }

    #[test]
    fn test_selected_severity_is_sent() {
        let mut d = draft("t");
        d.severity = Severity::Critical;
        let form = d.to_multipart().unwrap();
        assert_eq!(form.text_value("severity"), Some("critical"));
    }

    #[test]
    fn test_format_size_mb() {
        assert_eq!(format_size_mb(0.0), "0.00 MB");
        assert_eq!(format_size_mb(1024.0 * 1024.0), "1.00 MB");
        assert_eq!(format_size_mb(2_621_440.0), "2.50 MB");
    }
}
