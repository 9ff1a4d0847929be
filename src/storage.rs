//! 备忘录存储
//!
//! `MemoStore` 持有全部备忘录并持久化到 TOML 文件，通过显式订阅向视图推送
//! 有序快照；`RemoteWatcher` 在后台线程中检测外部同步进程对数据文件的修改。

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, SystemTime};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};

use crate::error::StoreError;
use crate::models::{MemoStoreData, VoiceMemo, sort_memos};

/// 推送给订阅者的事件
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    /// 有序的完整快照
    RecordsChanged(Vec<VoiceMemo>),
    /// 数据文件被外部修改（无负载信号）
    RemoteChange,
}

pub type SubscriptionId = u64;

/// 订阅句柄，事件在 `events` 上按发布顺序到达
pub struct Subscription {
    pub id: SubscriptionId,
    pub events: Receiver<StoreEvent>,
}

/// 文件签名：修改时间 + 长度
type FileStamp = (SystemTime, u64);

struct Inner {
    memos: Vec<VoiceMemo>,
    subscribers: Vec<(SubscriptionId, Sender<StoreEvent>)>,
    next_id: SubscriptionId,
    stamp: Option<FileStamp>,
    failed_stamp: Option<FileStamp>, // 上次读取失败时的签名
}

#[derive(Clone)]
pub struct MemoStore {
    path: Option<PathBuf>,
    inner: Arc<Mutex<Inner>>,
}

impl MemoStore {
    /// 打开文件存储，文件不存在时为空
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let memos = load_memos(&path)?;
        log::info!("Loaded {} memos from {}", memos.len(), path.display());

        let store = Self::with_memos(Some(path.clone()), memos);
        store.lock().stamp = file_stamp(&path);
        Ok(store)
    }

    /// 不落盘的存储
    pub fn in_memory() -> Self {
        Self::with_memos(None, Vec::new())
    }

    fn with_memos(path: Option<PathBuf>, mut memos: Vec<VoiceMemo>) -> Self {
        sort_memos(&mut memos);
        Self {
            path,
            inner: Arc::new(Mutex::new(Inner {
                memos,
                subscribers: Vec::new(),
                next_id: 0,
                stamp: None,
                failed_stamp: None,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 有序快照
    pub fn memos(&self) -> Vec<VoiceMemo> {
        self.lock().memos.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().memos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 添加或替换同 id 的备忘录
    pub fn insert(&self, memo: VoiceMemo) -> Result<(), StoreError> {
        let mut inner = self.lock();
        let mut memos = inner.memos.clone();
        memos.retain(|m| m.id != memo.id);
        memos.push(memo);
        sort_memos(&mut memos);
        self.commit(&mut inner, memos)
    }

    /// 删除备忘录，返回是否存在
    pub fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let mut inner = self.lock();
        if !inner.memos.iter().any(|m| m.id == id) {
            return Ok(false);
        }
        let memos: Vec<VoiceMemo> = inner.memos.iter().filter(|m| m.id != id).cloned().collect();
        self.commit(&mut inner, memos)?;
        Ok(true)
    }

    fn commit(&self, inner: &mut Inner, memos: Vec<VoiceMemo>) -> Result<(), StoreError> {
        if let Some(path) = &self.path {
            save_memos(path, &memos)?;
            inner.stamp = file_stamp(path);
        }
        inner.memos = memos;
        let snapshot = inner.memos.clone();
        publish(inner, StoreEvent::RecordsChanged(snapshot));
        Ok(())
    }

    /// 订阅，立即收到当前快照
    pub fn subscribe(&self) -> Subscription {
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;

        let (tx, rx) = unbounded();
        // 接收端就在手里，发送不会失败
        let _ = tx.send(StoreEvent::RecordsChanged(inner.memos.clone()));
        inner.subscribers.push((id, tx));
        log::debug!("Subscriber {} registered", id);

        Subscription { id, events: rx }
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        let mut inner = self.lock();
        inner.subscribers.retain(|(sub_id, _)| *sub_id != id);
        log::debug!("Subscriber {} removed", id);
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    /// 重新读取数据文件并发出远程变更信号
    pub fn reload_from_disk(&self) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        // 先取签名：读取期间的写入留给下一次轮询
        let stamp = file_stamp(path);
        let memos = load_memos(path)?;

        let mut inner = self.lock();
        inner.memos = memos;
        inner.stamp = stamp;
        inner.failed_stamp = None;
        log::info!("Remote change: reloaded {} memos", inner.memos.len());

        let snapshot = inner.memos.clone();
        publish(&mut inner, StoreEvent::RecordsChanged(snapshot));
        publish(&mut inner, StoreEvent::RemoteChange);
        Ok(())
    }

    /// 检查数据文件是否被外部修改，是则重新加载
    ///
    /// 同一个损坏的文件只报告一次错误，文件再次变化后才重试
    pub fn poll_remote(&self) -> Result<bool, StoreError> {
        let Some(path) = &self.path else {
            return Ok(false);
        };
        let current = file_stamp(path);
        {
            let inner = self.lock();
            if current == inner.stamp || (current.is_some() && current == inner.failed_stamp) {
                return Ok(false);
            }
        }
        if let Err(e) = self.reload_from_disk() {
            self.lock().failed_stamp = current;
            return Err(e);
        }
        Ok(true)
    }
}

fn publish(inner: &mut Inner, event: StoreEvent) {
    inner
        .subscribers
        .retain(|(_, tx)| tx.send(event.clone()).is_ok());
}

fn file_stamp(path: &Path) -> Option<FileStamp> {
    let meta = fs::metadata(path).ok()?;
    Some((meta.modified().ok()?, meta.len()))
}

/// 从TOML文件加载备忘录（已排序）
fn load_memos(path: &Path) -> Result<Vec<VoiceMemo>, StoreError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let data: MemoStoreData = toml::from_str(&content).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let mut memos = data.memos;
    sort_memos(&mut memos);
    Ok(memos)
}

/// 保存备忘录到TOML文件
fn save_memos(path: &Path, memos: &[VoiceMemo]) -> Result<(), StoreError> {
    let write_err = |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    let data = MemoStoreData::new(memos.to_vec());
    let content = toml::to_string_pretty(&data)?;
    fs::write(path, content).map_err(write_err)?;

    log::debug!("Saved {} memos to {}", memos.len(), path.display());
    Ok(())
}

/// 后台远程变更检测线程
pub struct RemoteWatcher {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl RemoteWatcher {
    pub fn spawn(store: MemoStore, interval: Duration) -> Self {
        let (stop_tx, stop_rx) = unbounded::<()>();

        let handle = thread::spawn(move || {
            log::info!("Remote watcher started ({:?} interval)", interval);
            loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        if let Err(e) = store.poll_remote() {
                            log::error!("Remote reload failed: {}", e);
                        }
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            log::info!("Remote watcher stopped");
        });

        Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        }
    }

    pub fn stop(&mut self) {
        // 丢弃发送端即通知线程退出
        self.stop_tx.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("Remote watcher thread panicked");
            }
        }
    }
}

impl Drop for RemoteWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_store(path: &Path, titles: &[&str]) {
        let memos = titles
            .iter()
            .enumerate()
            .map(|(i, t)| VoiceMemo::new(t.to_string(), String::new(), i as i64))
            .collect::<Vec<_>>();
        save_memos(path, &memos).unwrap();
    }

    fn drain(sub: &Subscription) -> Vec<StoreEvent> {
        sub.events.try_iter().collect()
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoStore::open(dir.path().join("memos.toml")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_open_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memos.toml");
        fs::write(&path, "memos = 7").unwrap();

        assert!(matches!(
            MemoStore::open(&path),
            Err(StoreError::Parse { .. })
        ));
    }

    #[test]
    fn test_insert_persists_and_orders() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memos.toml");
        let store = MemoStore::open(&path).unwrap();

        store
            .insert(VoiceMemo::new("second".into(), String::new(), 2))
            .unwrap();
        store
            .insert(VoiceMemo::new("first".into(), String::new(), 1))
            .unwrap();

        let reopened = MemoStore::open(&path).unwrap();
        let titles: Vec<String> = reopened.memos().into_iter().map(|m| m.title).collect();
        assert_eq!(titles, vec!["first", "second"]);
    }

    #[test]
    fn test_subscribe_receives_snapshot_then_changes() {
        let store = MemoStore::in_memory();
        let sub = store.subscribe();
        assert_eq!(drain(&sub), vec![StoreEvent::RecordsChanged(Vec::new())]);

        let memo = VoiceMemo::new("hello".into(), String::new(), 0);
        store.insert(memo.clone()).unwrap();
        assert_eq!(drain(&sub), vec![StoreEvent::RecordsChanged(vec![memo.clone()])]);

        assert!(store.remove(&memo.id).unwrap());
        assert!(!store.remove(&memo.id).unwrap());
        assert_eq!(drain(&sub), vec![StoreEvent::RecordsChanged(Vec::new())]);
    }

    #[test]
    fn test_unsubscribe_and_prune() {
        let store = MemoStore::in_memory();
        let kept = store.subscribe();
        let removed = store.subscribe();
        let dropped = store.subscribe();
        assert_eq!(store.subscriber_count(), 3);

        store.unsubscribe(removed.id);
        drop(dropped);
        store
            .insert(VoiceMemo::new("x".into(), String::new(), 0))
            .unwrap();

        assert_eq!(store.subscriber_count(), 1);
        assert_eq!(drain(&kept).len(), 2);
    }

    #[test]
    fn test_poll_remote_detects_external_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memos.toml");
        write_store(&path, &["one"]);

        let store = MemoStore::open(&path).unwrap();
        let sub = store.subscribe();
        drain(&sub);
        assert!(!store.poll_remote().unwrap());

        write_store(&path, &["one", "two", "three"]);
        assert!(store.poll_remote().unwrap());
        assert_eq!(store.len(), 3);

        let events = drain(&sub);
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], StoreEvent::RecordsChanged(m) if m.len() == 3));
        assert_eq!(events[1], StoreEvent::RemoteChange);

        assert!(!store.poll_remote().unwrap());
    }

    #[test]
    fn test_broken_file_reported_once_until_changed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memos.toml");
        write_store(&path, &["one"]);
        let store = MemoStore::open(&path).unwrap();

        fs::write(&path, "memos = 7").unwrap();
        let errors = (0..5).filter(|_| store.poll_remote().is_err()).count();
        assert_eq!(errors, 1);
        assert_eq!(store.len(), 1);

        write_store(&path, &["one", "two"]);
        assert!(store.poll_remote().unwrap());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_own_writes_are_not_remote() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memos.toml");
        let store = MemoStore::open(&path).unwrap();

        store
            .insert(VoiceMemo::new("local".into(), String::new(), 0))
            .unwrap();
        assert!(!store.poll_remote().unwrap());
    }

    #[test]
    fn test_watcher_reloads_and_stops() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memos.toml");
        let store = MemoStore::open(&path).unwrap();
        let sub = store.subscribe();
        drain(&sub);

        let mut watcher = RemoteWatcher::spawn(store.clone(), Duration::from_millis(10));
        // 原子替换，避免读到写了一半的文件
        let staged = dir.path().join("memos.toml.tmp");
        write_store(&staged, &["synced"]);
        fs::rename(&staged, &path).unwrap();

        let deadline = Duration::from_secs(5);
        let mut saw_remote = false;
        while let Ok(event) = sub.events.recv_timeout(deadline) {
            if event == StoreEvent::RemoteChange {
                saw_remote = true;
                break;
            }
        }
        watcher.stop();

        assert!(saw_remote);
        assert_eq!(store.len(), 1);
    }
}
