//! Static phrase table mapping natural-language phrases to shell commands.
//!
//! Phrases are mixed Chinese/English; several phrases in both languages map
//! to the same command. The table is declared in one fixed order because the
//! fuzzy-matching pass uses declaration order as its tie-break, so the order
//! here is part of the contract, not an accident.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// One phrase-to-command mapping.
///
/// Commands containing `{name}` placeholders are parameterized: they are
/// resolved through the intent families in [`super::intents`] and never
/// through exact or fuzzy lookup.
#[derive(Debug, Clone, Copy)]
pub struct PhraseEntry {
    pub phrase: &'static str,
    pub command: &'static str,
}

impl PhraseEntry {
    /// Whether the command still contains unresolved template placeholders.
    pub fn is_parameterized(&self) -> bool {
        self.command.contains('{')
    }
}

const fn entry(phrase: &'static str, command: &'static str) -> PhraseEntry {
    PhraseEntry { phrase, command }
}

/// The phrase table, in tie-break order.
pub static PHRASE_TABLE: &[PhraseEntry] = &[
    // System administration
    entry("切换到管理员", "sudo su"),
    entry("switch to administrator", "sudo su"),
    entry("become root", "sudo su"),
    entry("切换到root", "sudo su"),
    entry("登录root", "sudo su"),
    entry("sudo", "sudo su"),
    // Directory operations
    entry("查看当前目录", "pwd"),
    entry("当前目录", "pwd"),
    entry("show current directory", "pwd"),
    entry("current directory", "pwd"),
    entry("where am i", "pwd"),
    entry("列出文件", "ls -la"),
    entry("显示文件", "ls -la"),
    entry("查看文件", "ls -la"),
    entry("list files", "ls -la"),
    entry("show files", "ls -la"),
    entry("ls", "ls -la"),
    entry("返回上一级", "cd .."),
    entry("上一级目录", "cd .."),
    entry("go back", "cd .."),
    entry("parent directory", "cd .."),
    // System information
    entry("查看磁盘空间", "df -h"),
    entry("磁盘空间", "df -h"),
    entry("disk space", "df -h"),
    entry("show disk", "df -h"),
    entry("df", "df -h"),
    entry("查看内存使用", "free -h"),
    entry("内存使用", "free -h"),
    entry("memory usage", "free -h"),
    entry("show memory", "free -h"),
    entry("free", "free -h"),
    entry("查看系统信息", "uname -a"),
    entry("系统信息", "uname -a"),
    entry("system information", "uname -a"),
    entry("system info", "uname -a"),
    entry("查看cpu信息", "lscpu"),
    entry("cpu信息", "lscpu"),
    entry("cpu info", "lscpu"),
    // Process management
    entry("查看进程", "ps aux"),
    entry("显示进程", "ps aux"),
    entry("show processes", "ps aux"),
    entry("list processes", "ps aux"),
    entry("ps", "ps aux"),
    entry("查看进程树", "pstree"),
    entry("process tree", "pstree"),
    entry("查看资源占用", "top"),
    entry("系统监控", "top"),
    entry("monitor system", "top"),
    entry("top", "top"),
    // Network operations
    entry("查看网络", "ip addr"),
    entry("查看ip", "ip addr"),
    entry("show ip", "ip addr"),
    entry("network info", "ip addr"),
    entry("ip address", "ip addr"),
    entry("ping测试", "ping -c 4 8.8.8.8"),
    entry("test network", "ping -c 4 8.8.8.8"),
    entry("ping", "ping -c 4 8.8.8.8"),
    entry("查看端口", "netstat -tuln"),
    entry("show ports", "netstat -tuln"),
    entry("list ports", "netstat -tuln"),
    // File operations (parameterized; resolved via intent families)
    entry("创建文件夹", "mkdir {folder}"),
    entry("新建文件夹", "mkdir {folder}"),
    entry("create folder", "mkdir {folder}"),
    entry("make directory", "mkdir {folder}"),
    entry("删除文件", "rm {file}"),
    entry("remove file", "rm {file}"),
    entry("删除文件夹", "rm -r {folder}"),
    entry("remove folder", "rm -r {folder}"),
    entry("复制文件", "cp {source} {dest}"),
    entry("copy file", "cp {source} {dest}"),
    entry("移动文件", "mv {source} {dest}"),
    entry("move file", "mv {source} {dest}"),
    entry("重命名", "mv {source} {dest}"),
    entry("rename", "mv {source} {dest}"),
    entry("查找文件", "find . -name {file}"),
    entry("find file", "find . -name {file}"),
    entry("search file", "find . -name {file}"),
    entry("查看文件内容", "cat {file}"),
    entry("show file", "cat {file}"),
    entry("read file", "cat {file}"),
    entry("编辑文件", "nano {file}"),
    entry("edit file", "nano {file}"),
    // Permission operations
    entry("修改权限", "chmod {mode} {file}"),
    entry("change permission", "chmod {mode} {file}"),
    entry("修改所有者", "chown {owner} {file}"),
    entry("change owner", "chown {owner} {file}"),
    // Package management (Debian/Ubuntu)
    entry("更新软件", "sudo apt update"),
    entry("update packages", "sudo apt update"),
    entry("apt update", "sudo apt update"),
    entry("升级软件", "sudo apt upgrade"),
    entry("upgrade packages", "sudo apt upgrade"),
    entry("apt upgrade", "sudo apt upgrade"),
    entry("安装软件", "sudo apt install {package}"),
    entry("install package", "sudo apt install {package}"),
    entry("删除软件", "sudo apt remove {package}"),
    entry("remove package", "sudo apt remove {package}"),
    // Text processing
    entry("搜索内容", "grep {pattern} {file}"),
    entry("search in file", "grep {pattern} {file}"),
    // Compression
    entry("解压zip", "unzip {file}"),
    entry("extract zip", "unzip {file}"),
    entry("解压tar", "tar -xvf {file}"),
    entry("extract tar", "tar -xvf {file}"),
    entry("压缩文件", "tar -czvf {archive}.tar.gz {files}"),
    entry("compress files", "tar -czvf {archive}.tar.gz {files}"),
    // Other common commands
    entry("清屏", "clear"),
    entry("clear screen", "clear"),
    entry("clear", "clear"),
    entry("查看历史", "history"),
    entry("show history", "history"),
    entry("command history", "history"),
    entry("查看日期", "date"),
    entry("show date", "date"),
    entry("current time", "date"),
    entry("重启", "sudo reboot"),
    entry("reboot", "sudo reboot"),
    entry("restart", "sudo reboot"),
    entry("关机", "sudo shutdown -h now"),
    entry("shutdown", "sudo shutdown -h now"),
    entry("power off", "sudo shutdown -h now"),
];

/// Exact-lookup index over the non-parameterized entries.
///
/// Parameterized entries are excluded: without an argument there is nothing
/// to substitute into the template, so a bare trigger phrase must not
/// resolve to a command with a literal `{placeholder}` in it. The first
/// entry wins if a phrase ever appears twice.
static EXACT_INDEX: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut index = HashMap::new();
    for e in PHRASE_TABLE {
        if !e.is_parameterized() {
            index.entry(e.phrase).or_insert(e.command);
        }
    }
    index
});

/// Look up a normalized utterance verbatim.
pub fn exact_lookup(normalized: &str) -> Option<&'static str> {
    EXACT_INDEX.get(normalized).copied()
}
