// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持英文（默认）、西班牙文和中文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 支持的语言
pub const SUPPORTED_LOCALES: [&str; 3] = ["en", "es", "zh-CN"];

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"en" / "es" / "zh-CN"），未知语言回退到 en
pub fn set_locale(locale: &str) {
    if SUPPORTED_LOCALES.contains(&locale) {
        rust_i18n::set_locale(locale);
    } else {
        tracing::warn!(locale, "不支持的语言,使用 en");
        rust_i18n::set_locale("en");
    }
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use schedule_health::i18n::t;
/// let msg = t("common.unnamed");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use schedule_health::i18n::t_with_args;
/// let msg = t_with_args("criteria.open_ends", &[("count", "3")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // locale 为全局状态,测试并行执行时需串行化
    static LOCALE_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_set_locale() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("zh-CN");
        assert_eq!(current_locale(), "zh-CN");

        set_locale("es");
        assert_eq!(current_locale(), "es");

        // 未知语言回退
        set_locale("fr");
        assert_eq!(current_locale(), "en");
    }

    #[test]
    fn test_translate_simple() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");
        assert_eq!(t("analysis.default_name"), "Schedule Analysis");

        set_locale("es");
        assert_eq!(t("analysis.default_name"), "Análisis de Cronograma");

        set_locale("zh-CN");
        assert_eq!(t("common.unnamed"), "未命名");

        set_locale("en");
    }

    #[test]
    fn test_translate_with_args() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");
        let msg = t_with_args("criteria.missing_predecessors", &[("count", "4")]);
        assert_eq!(msg, "4 activities without predecessors");

        set_locale("es");
        let msg = t_with_args("criteria.missing_predecessors", &[("count", "4")]);
        assert_eq!(msg, "4 actividades sin predecesores");

        set_locale("en");
        let msg = t_with_args(
            "criteria.relationship_types",
            &[("FS", "75.0"), ("SS", "25.0"), ("FF", "0.0"), ("SF", "0.0")],
        );
        assert_eq!(msg, "FS=75.0%, SS=25.0%, FF=0.0%, SF=0.0%");
    }
}
