use std::collections::{HashMap, VecDeque};

// 壁纸预览缩略图的内存缓存：cache_key -> base64 data URL，LRU 淘汰
#[derive(Debug, Default)]
pub struct ThumbnailMemoryCache {
    cache: HashMap<String, String>,
    order: VecDeque<String>,
    max_size: usize,
}

impl ThumbnailMemoryCache {
    pub fn new(max_size: usize) -> Self {
        Self {
            cache: HashMap::new(),
            order: VecDeque::new(),
            max_size,
        }
    }

    pub fn get(&mut self, key: &str) -> Option<String> {
        if let Some(value) = self.cache.get(key) {
            // 命中后移到队尾，保持 LRU 顺序
            self.order.retain(|k| k != key);
            self.order.push_back(key.to_string());
            Some(value.clone())
        } else {
            None
        }
    }

    pub fn insert(&mut self, key: String, value: String) {
        if self.cache.contains_key(&key) {
            self.order.retain(|k| k != &key);
        } else if self.cache.len() >= self.max_size {
            if let Some(oldest) = self.order.pop_front() {
                self.cache.remove(&oldest);
            }
        }
        self.order.push_back(key.clone());
        self.cache.insert(key, value);
    }
}
