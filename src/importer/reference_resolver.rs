// ==========================================
// 供应商问卷系统 - 引用解析（标签 / 分区）
// ==========================================
// 规则:
// - 名称大小写不敏感匹配已有实体 → 实体 id
// - 未匹配名称进入建议集（按输入原样去重）
// - 分区额外遵循"沿用上一个已解析分区"规则
// ==========================================

use crate::domain::import::SuggestionSet;
use crate::domain::question::NamedEntity;

// ==========================================
// ReferenceResolver - 已知实体快照上的名称解析
// ==========================================
pub struct ReferenceResolver<'a, E: NamedEntity> {
    known: &'a [E],
}

impl<'a, E: NamedEntity> ReferenceResolver<'a, E> {
    pub fn new(known: &'a [E]) -> Self {
        Self { known }
    }

    /// 大小写不敏感查找，多个同名实体时取第一个
    pub fn find(&self, name: &str) -> Option<&'a E> {
        let lower = name.to_lowercase();
        self.known
            .iter()
            .find(|entity| entity.name().to_lowercase() == lower)
    }

    /// 解析一组名称，返回已解析 id（去重，保持顺序）；未解析名称写入建议集
    pub fn resolve_all(&self, names: &[String], suggestions: &mut SuggestionSet) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();
        for name in names {
            match self.find(name) {
                Some(entity) => {
                    if !ids.iter().any(|id| id == entity.id()) {
                        ids.push(entity.id().to_string());
                    }
                }
                None => {
                    suggestions.insert(name);
                }
            }
        }
        ids
    }
}

// ==========================================
// SectionCursor - 当前分区（沿用语义）
// ==========================================
// 行未给出可解析分区时，沿用文件顺序中最近一次解析成功的分区
#[derive(Debug, Default)]
pub struct SectionCursor {
    current: Option<String>,
}

impl SectionCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// 推进游标并返回该行的分区 id
    pub fn advance<E: NamedEntity>(
        &mut self,
        resolver: &ReferenceResolver<'_, E>,
        name: Option<&str>,
        suggestions: &mut SuggestionSet,
    ) -> Option<String> {
        if let Some(name) = name {
            match resolver.find(name) {
                Some(section) => self.current = Some(section.id().to_string()),
                None => {
                    suggestions.insert(name);
                }
            }
        }
        self.current.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::question::{Section, Tag};

    fn tag(id: &str, name: &str) -> Tag {
        Tag {
            id: id.to_string(),
            name: name.to_string(),
            color: "#2563EB".to_string(),
            description: None,
        }
    }

    fn section(id: &str, name: &str, order: i64) -> Section {
        Section {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            order,
        }
    }

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolve_tags_case_insensitive() {
        let tags = vec![tag("t1", "Quality"), tag("t2", "Tier 1")];
        let resolver = ReferenceResolver::new(&tags);
        let mut suggestions = SuggestionSet::default();

        let ids = resolver.resolve_all(&names(&["quality", "TIER 1", "BrandNew"]), &mut suggestions);

        assert_eq!(ids, vec!["t1", "t2"]);
        assert_eq!(suggestions.names(), &["BrandNew".to_string()]);
    }

    #[test]
    fn test_resolve_tags_dedups_ids() {
        let tags = vec![tag("t1", "Quality")];
        let resolver = ReferenceResolver::new(&tags);
        let mut suggestions = SuggestionSet::default();

        let ids = resolver.resolve_all(&names(&["Quality", "quality"]), &mut suggestions);

        assert_eq!(ids, vec!["t1"]);
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_unknown_name_suggested_once() {
        let tags: Vec<Tag> = vec![];
        let resolver = ReferenceResolver::new(&tags);
        let mut suggestions = SuggestionSet::default();

        resolver.resolve_all(&names(&["New"]), &mut suggestions);
        resolver.resolve_all(&names(&["New", "New"]), &mut suggestions);

        assert_eq!(suggestions.len(), 1);
    }

    #[test]
    fn test_section_carry_forward() {
        let sections = vec![section("s1", "Intro", 0), section("s2", "Quality", 1)];
        let resolver = ReferenceResolver::new(&sections);
        let mut cursor = SectionCursor::new();
        let mut suggestions = SuggestionSet::default();

        let r1 = cursor.advance(&resolver, Some("Intro"), &mut suggestions);
        let r2 = cursor.advance(&resolver, None, &mut suggestions);
        let r3 = cursor.advance(&resolver, Some("intro"), &mut suggestions);

        assert_eq!(r1.as_deref(), Some("s1"));
        assert_eq!(r2, r1);
        assert_eq!(r3.as_deref(), Some("s1"));
    }

    #[test]
    fn test_unknown_section_keeps_previous_and_suggests() {
        let sections = vec![section("s1", "Intro", 0)];
        let resolver = ReferenceResolver::new(&sections);
        let mut cursor = SectionCursor::new();
        let mut suggestions = SuggestionSet::default();

        assert_eq!(cursor.advance(&resolver, Some("Missing"), &mut suggestions), None);
        cursor.advance(&resolver, Some("Intro"), &mut suggestions);
        let after_unknown = cursor.advance(&resolver, Some("Appendix"), &mut suggestions);

        assert_eq!(after_unknown.as_deref(), Some("s1"));
        assert_eq!(
            suggestions.names(),
            &["Missing".to_string(), "Appendix".to_string()]
        );
    }
}
