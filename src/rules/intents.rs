//! Parameterized intent families.
//!
//! Each family pairs a set of bilingual trigger phrases with a capture
//! regex that pulls one or two trailing tokens out of the utterance and
//! substitutes them into a command template. Families are checked in
//! declaration order; veto phrases keep overlapping triggers apart (e.g.
//! "删除文件夹" must never fire the file-deletion family, and "uninstall"
//! must never fire the install family).

use once_cell::sync::Lazy;
use regex::Regex;

struct IntentFamily {
    /// The utterance must contain one of these for the family to apply.
    triggers: &'static [&'static str],
    /// The family is skipped if the utterance contains any of these.
    veto: &'static [&'static str],
    /// Capture regex; group 1 (and group 2 for two-argument families).
    pattern: &'static str,
    /// Command template; `{0}` and `{1}` are the capture groups.
    template: &'static str,
    /// First arguments that disqualify the match (e.g. "cd 管理员" is a
    /// privilege switch, not a directory change).
    veto_args: &'static [&'static str],
}

const fn family(
    triggers: &'static [&'static str],
    veto: &'static [&'static str],
    pattern: &'static str,
    template: &'static str,
) -> IntentFamily {
    IntentFamily {
        triggers,
        veto,
        pattern,
        template,
        veto_args: &[],
    }
}

static INTENT_FAMILIES: &[IntentFamily] = &[
    // Create directory
    family(
        &["创建文件夹", "新建文件夹", "create folder", "make directory", "mkdir"],
        &[],
        r"(?:创建文件夹|新建文件夹|create folder|make directory|mkdir)\s+(\S+)",
        "mkdir {0}",
    ),
    // Delete file (vetoed by folder keywords)
    family(
        &["删除文件", "remove file"],
        &["文件夹", "folder"],
        r"(?:删除文件|remove file)\s+(\S+)",
        "rm {0}",
    ),
    // Delete directory
    family(
        &["删除文件夹", "remove folder", "delete folder"],
        &[],
        r"(?:删除文件夹|remove folder|delete folder)\s+(\S+)",
        "rm -r {0}",
    ),
    // Find file
    family(
        &["查找文件", "find file", "search file"],
        &[],
        r"(?:查找文件|find file|search file)\s+(\S+)",
        "find . -name {0}",
    ),
    // Show file contents
    family(
        &["查看文件内容", "show file", "read file", "cat"],
        &[],
        r"(?:查看文件内容|show file|read file|cat)\s+(\S+)",
        "cat {0}",
    ),
    // Edit file
    family(
        &["编辑文件", "edit file"],
        &[],
        r"(?:编辑文件|edit file)\s+(\S+)",
        "nano {0}",
    ),
    // Copy file
    family(
        &["复制文件", "copy file"],
        &[],
        r"(?:复制文件|copy file)\s+(\S+)\s+(?:到|to)?\s*(\S+)",
        "cp {0} {1}",
    ),
    // Move / rename file
    family(
        &["移动文件", "move file", "重命名", "rename"],
        &[],
        r"(?:移动文件|move file|重命名|rename)\s+(\S+)\s+(?:到|to)?\s*(\S+)",
        "mv {0} {1}",
    ),
    // Change directory ("cd 管理员" and friends are privilege switches
    // handled by the phrase table, not directory changes)
    IntentFamily {
        triggers: &["切换到", "进入", "cd ", "go to", "change to"],
        veto: &[],
        pattern: r"(?:切换到|进入|cd|go to|change to)\s+(\S+)",
        template: "cd {0}",
        veto_args: &["管理员", "administrator", "root"],
    },
    // Install package ("uninstall" contains "install" and must not fire this)
    family(
        &["安装软件", "install package", "install"],
        &["uninstall"],
        r"(?:安装软件|install package|install)\s+(\S+)",
        "sudo apt install {0}",
    ),
    // Remove package
    family(
        &["删除软件", "remove package", "uninstall"],
        &[],
        r"(?:删除软件|remove package|uninstall)\s+(\S+)",
        "sudo apt remove {0}",
    ),
    // Change permission
    family(
        &["修改权限", "change permission", "chmod"],
        &[],
        r"(?:修改权限|change permission|chmod)\s+(\S+)\s+(\S+)",
        "chmod {0} {1}",
    ),
    // Search in file
    family(
        &["搜索内容", "search in file", "grep"],
        &[],
        r"(?:搜索内容|search in file|grep)\s+(\S+)\s+(\S+)",
        "grep {0} {1}",
    ),
];

// Pattern literals above are compile-time constants; a failure here is a
// programming error caught by the tests, not a runtime condition.
#[allow(clippy::unwrap_used)]
static COMPILED: Lazy<Vec<(&'static IntentFamily, Regex)>> = Lazy::new(|| {
    INTENT_FAMILIES
        .iter()
        .map(|f| (f, Regex::new(f.pattern).unwrap()))
        .collect()
});

/// Resolve an utterance through the intent families, first match wins.
pub fn apply(utterance: &str) -> Option<String> {
    for (fam, re) in COMPILED.iter() {
        if !fam.triggers.iter().any(|t| utterance.contains(t)) {
            continue;
        }
        if fam.veto.iter().any(|v| utterance.contains(v)) {
            continue;
        }
        let Some(caps) = re.captures(utterance) else {
            continue;
        };
        let first = match caps.get(1) {
            Some(m) => m.as_str(),
            None => continue,
        };
        if fam.veto_args.contains(&first) {
            continue;
        }
        let mut command = fam.template.replace("{0}", first);
        if let Some(second) = caps.get(2) {
            command = command.replace("{1}", second.as_str());
        }
        // Every placeholder must have been satisfied by a capture group;
        // otherwise the family does not apply.
        if command.contains('{') {
            continue;
        }
        return Some(command);
    }
    None
}
