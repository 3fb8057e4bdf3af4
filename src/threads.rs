use std::thread::JoinHandle;

/// Named worker thread with an optional stack size. A panic inside the
/// worker is logged and ends only that thread.
pub struct Worker {
    name: &'static str,
    stack_kb: Option<usize>,
}

impl Worker {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            stack_kb: None,
        }
    }

    pub fn with_stack_size(mut self, stack_kb: usize) -> Self {
        self.stack_kb = Some(stack_kb);
        self
    }

    pub fn spawn<F>(self, work: F) -> anyhow::Result<JoinHandle<()>>
    where
        F: FnOnce() + Send + 'static,
    {
        let Self { name, stack_kb } = self;

        // ThreadSpawnConfiguration is ignored by std threads on ESP-IDF, the builder is what counts
        let mut builder = std::thread::Builder::new().name(name.to_string());
        if let Some(stack_kb) = stack_kb {
            builder = builder.stack_size(stack_kb * 1024);
        }

        let handle = builder.spawn(move || {
            if let Err(err) = std::panic::catch_unwind(std::panic::AssertUnwindSafe(work)) {
                log::error!("[{name}] worker panicked: {:?}", err);
            }
        })?;
        log::info!("[{name}] worker started");

        Ok(handle)
    }
}

pub fn debug_dump_stack_info() {
    let task_name =
        unsafe { std::ffi::CStr::from_ptr(esp_idf_hal::sys::pcTaskGetName(std::ptr::null_mut())) }
            .to_string_lossy();

    let free_stack = unsafe { esp_idf_hal::sys::uxTaskGetStackHighWaterMark(std::ptr::null_mut()) };
    log::info!("[{task_name}] Free stack: {free_stack}b");

    let free_heap = unsafe { esp_idf_hal::sys::xPortGetFreeHeapSize() };
    log::info!("[{task_name}] Free heap: {free_heap}b");
}
