//! Scenario classification for prompt selection.
//!
//! Before the model is asked to translate an utterance, the utterance is
//! classified into one of five scenarios so the request can carry a
//! specialized instruction template. Classification runs a short chain of
//! override rules first, then falls back to keyword scoring. The chain
//! order is behaviorally significant: a URL is unambiguous evidence of
//! network intent and outranks any keyword score, so the rules below must
//! stay in this order.

/// The scenario labels, one per instruction template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    FileOperations,
    SystemManagement,
    NetworkOperations,
    TextProcessing,
    /// Default label when nothing else applies.
    CommandGeneration,
}

impl Scenario {
    /// Stable identifier, also the stem of the instruction template file.
    pub fn name(self) -> &'static str {
        match self {
            Scenario::FileOperations => "file_operations",
            Scenario::SystemManagement => "system_management",
            Scenario::NetworkOperations => "network_operations",
            Scenario::TextProcessing => "text_processing",
            Scenario::CommandGeneration => "command_generation",
        }
    }
}

const URL_SCHEMES: &[&str] = &["http://", "https://", "ftp://"];

const USER_WORDS: &[&str] = &["用户", "user"];
const USER_VERBS: &[&str] = &[
    "创建", "添加", "删除", "新建", "create", "add", "delete", "remove",
];

const TEXT_FILE_EXTENSIONS: &[&str] = &[
    ".txt", ".md", ".log", ".conf", ".cfg", ".ini", ".json", ".yaml", ".yml", ".xml", ".csv",
];
const EDIT_WORDS: &[&str] = &["编辑", "edit"];
const FILE_WORDS: &[&str] = &["文件", "file"];

const VIEW_CONTENT_PHRASES: &[&str] = &[
    "查看文件内容",
    "查看内容",
    "显示内容",
    "文件内容",
    "view content",
    "view file",
    "show content",
];

/// Keyword sets in declaration order; the order is the scoring tie-break
/// (network outranks system outranks text outranks file on equal scores).
static KEYWORD_SETS: &[(Scenario, &[&str])] = &[
    (
        Scenario::NetworkOperations,
        &[
            "下载", "download", "上传", "upload", "ping", "网络", "network", "wget", "curl",
            "ssh", "服务器", "server", "url", "连接", "connect", "端口", "port",
        ],
    ),
    (
        Scenario::SystemManagement,
        &[
            "进程", "process", "服务", "service", "用户", "user", "内存", "memory", "磁盘",
            "disk", "系统", "system", "监控", "monitor", "kill", "启动", "start", "重启",
            "restart", "权限", "permission",
        ],
    ),
    (
        Scenario::TextProcessing,
        &[
            "内容", "content", "编辑", "edit", "文本", "text", "搜索", "search", "关键词",
            "keyword", "查看", "view", "grep", "替换", "replace",
        ],
    ),
    (
        Scenario::FileOperations,
        &[
            "文件夹", "folder", "文件", "file", "目录", "directory", "创建", "create", "删除",
            "delete", "复制", "copy", "移动", "move", "重命名", "rename",
        ],
    ),
];

/// Classify an utterance into a scenario.
pub fn classify(utterance: &str) -> Scenario {
    let u = utterance.to_lowercase();

    // 1. URLs outrank everything else.
    if URL_SCHEMES.iter().any(|s| u.contains(s)) {
        return Scenario::NetworkOperations;
    }

    // 2. Account management: "user" together with a create/add/delete verb.
    if USER_WORDS.iter().any(|w| u.contains(w)) && USER_VERBS.iter().any(|v| u.contains(v)) {
        return Scenario::SystemManagement;
    }

    // 3. Editing a recognizably textual file.
    if EDIT_WORDS.iter().any(|w| u.contains(w))
        && FILE_WORDS.iter().any(|w| u.contains(w))
        && TEXT_FILE_EXTENSIONS.iter().any(|e| u.contains(e))
    {
        return Scenario::TextProcessing;
    }

    // 4. Content viewing phrases.
    if VIEW_CONTENT_PHRASES.iter().any(|p| u.contains(p)) {
        return Scenario::TextProcessing;
    }

    // 5. Keyword scoring; strict maximum, declaration order breaks ties.
    let mut best = Scenario::CommandGeneration;
    let mut best_score = 0usize;
    for (scenario, keywords) in KEYWORD_SETS {
        let score = keywords.iter().filter(|k| u.contains(*k)).count();
        if score > best_score {
            best = *scenario;
            best_score = score;
        }
    }
    best
}
