//! 界面元素的中文对照表，键为标记中使用的英文原文。

pub(super) fn lookup(key: &str) -> Option<&'static str> {
    Some(match key {
        // Navigation menu
        "Home" => "首页",
        "Archives" => "归档",
        "About" => "关于",

        // Tooltips
        "Bilibili" => "哔哩哔哩",
        "Instagram" => "Instagram",
        "Douban" => "豆瓣",
        "Email" => "邮箱",
        "RSS" => "RSS",
        "Language" => "语言",

        // Footer
        "Copyright" => "版权所有",
        "Powered by" => "技术支持",
        "Modified based on" => "基于",
        "theme" => "主题",

        // Pagination
        "Older Posts" => "上一页",
        "Newer Posts" => "下一页",

        // Other
        "Comments" => "留言",

        // Behavior-layer chrome
        "Copy Code" => "复制代码",
        "Copied" => "已复制 ✓",
        "Expand Code" => "展开代码",
        "Close" => "关闭",
        "zoomHint" => "滚轮缩放，拖动查看，双击关闭",
        "languageSwitched" => "已切换至中文",

        _ => return None,
    })
}
