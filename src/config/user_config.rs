// ==========================================
// 进度计划健康度评估 - 用户配置模型
// ==========================================
// 职责: 检查项目录（分类 / 检查项 / 权重 / 阈值）
// 存储: JSON（camelCase,与界面层导入导出一致）
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// CriterionThreshold - 检查项阈值
// ==========================================
// 注意: 仅为配置面,当前不参与状态判定（状态固定按 90/70 分档）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriterionThreshold {
    pub warning: f64,
    pub critical: f64,
}

impl Default for CriterionThreshold {
    fn default() -> Self {
        Self {
            warning: 5.0,
            critical: 10.0,
        }
    }
}

// ==========================================
// CriterionConfig - 检查项配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionConfig {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub enabled: bool,
    /// 分类内相对权重
    pub weight: u32,
    #[serde(default)]
    pub threshold: CriterionThreshold,
}

// ==========================================
// CategoryConfig - 分类配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryConfig {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub enabled: bool,
    /// 对整体得分的相对权重（建议 0-50）
    pub weight: u32,
    pub criteria: Vec<CriterionConfig>,
}

impl CategoryConfig {
    pub fn criterion(&self, criterion_id: &str) -> Option<&CriterionConfig> {
        self.criteria.iter().find(|c| c.id == criterion_id)
    }

    pub fn enabled_criteria(&self) -> impl Iterator<Item = &CriterionConfig> {
        self.criteria.iter().filter(|c| c.enabled)
    }
}

// ==========================================
// GlobalThresholds - 整体状态分界
// ==========================================
// 依次比较 excellent → good → fair,不校验三者大小顺序
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlobalThresholds {
    pub excellent: f64,
    pub good: f64,
    pub fair: f64,
}

impl Default for GlobalThresholds {
    fn default() -> Self {
        Self {
            excellent: 90.0,
            good: 75.0,
            fair: 60.0,
        }
    }
}

// ==========================================
// UserConfig - 用户配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserConfig {
    pub categories: Vec<CategoryConfig>,
    pub global_thresholds: GlobalThresholds,
}

impl UserConfig {
    pub fn category(&self, category_id: &str) -> Option<&CategoryConfig> {
        self.categories.iter().find(|c| c.id == category_id)
    }

    pub fn criterion(&self, category_id: &str, criterion_id: &str) -> Option<&CriterionConfig> {
        self.category(category_id)?.criterion(criterion_id)
    }

    pub fn enabled_categories(&self) -> impl Iterator<Item = &CategoryConfig> {
        self.categories.iter().filter(|c| c.enabled)
    }
}

// ==========================================
// 局部更新（浅合并,None 表示保持原值）
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub weight: Option<u32>,
    /// 整体替换检查项列表
    #[serde(default)]
    pub criteria: Option<Vec<CriterionConfig>>,
}

impl CategoryPatch {
    pub fn enabled(enabled: bool) -> Self {
        Self {
            enabled: Some(enabled),
            ..Default::default()
        }
    }

    pub fn weight(weight: u32) -> Self {
        Self {
            weight: Some(weight),
            ..Default::default()
        }
    }

    pub fn apply_to(&self, category: &mut CategoryConfig) {
        if let Some(name) = &self.name {
            category.name = name.clone();
        }
        if let Some(description) = &self.description {
            category.description = description.clone();
        }
        if let Some(enabled) = self.enabled {
            category.enabled = enabled;
        }
        if let Some(weight) = self.weight {
            category.weight = weight;
        }
        if let Some(criteria) = &self.criteria {
            category.criteria = criteria.clone();
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub weight: Option<u32>,
    #[serde(default)]
    pub threshold: Option<CriterionThreshold>,
}

impl CriterionPatch {
    pub fn enabled(enabled: bool) -> Self {
        Self {
            enabled: Some(enabled),
            ..Default::default()
        }
    }

    pub fn weight(weight: u32) -> Self {
        Self {
            weight: Some(weight),
            ..Default::default()
        }
    }

    pub fn apply_to(&self, criterion: &mut CriterionConfig) {
        if let Some(name) = &self.name {
            criterion.name = name.clone();
        }
        if let Some(description) = &self.description {
            criterion.description = description.clone();
        }
        if let Some(enabled) = self.enabled {
            criterion.enabled = enabled;
        }
        if let Some(weight) = self.weight {
            criterion.weight = weight;
        }
        if let Some(threshold) = self.threshold {
            criterion.threshold = threshold;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criterion(id: &str) -> CriterionConfig {
        CriterionConfig {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            enabled: true,
            weight: 10,
            threshold: CriterionThreshold::default(),
        }
    }

    #[test]
    fn test_criterion_patch_is_shallow_merge() {
        let mut c = criterion("open_ends");
        CriterionPatch::weight(25).apply_to(&mut c);
        assert_eq!(c.weight, 25);
        assert!(c.enabled, "未指定字段保持原值");
        assert_eq!(c.name, "open_ends");

        CriterionPatch {
            threshold: Some(CriterionThreshold {
                warning: 1.0,
                critical: 2.0,
            }),
            ..Default::default()
        }
        .apply_to(&mut c);
        assert_eq!(c.threshold.critical, 2.0);
        assert_eq!(c.weight, 25);
    }

    #[test]
    fn test_category_patch_is_shallow_merge() {
        let mut cat = CategoryConfig {
            id: "logic".to_string(),
            name: "Logic".to_string(),
            description: "d".to_string(),
            enabled: true,
            weight: 25,
            criteria: vec![criterion("a"), criterion("b")],
        };
        CategoryPatch::enabled(false).apply_to(&mut cat);
        assert!(!cat.enabled);
        assert_eq!(cat.weight, 25);
        assert_eq!(cat.criteria.len(), 2);
    }

    #[test]
    fn test_json_shape_is_camel_case() {
        let config = UserConfig {
            categories: vec![],
            global_thresholds: GlobalThresholds::default(),
        };
        let json = serde_json::to_value(&config).unwrap();
        assert!(json.get("globalThresholds").is_some());
        assert_eq!(json["globalThresholds"]["excellent"], 90.0);
    }

    #[test]
    fn test_patch_from_partial_json() {
        let patch: CriterionPatch = serde_json::from_str(r#"{"enabled": false}"#).unwrap();
        assert_eq!(patch, CriterionPatch::enabled(false));
    }
}
