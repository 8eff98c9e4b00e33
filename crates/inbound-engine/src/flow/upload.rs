use super::InboundFlow;
use crate::backend::{Backend, BackendError};
use crate::selectors::{self, xpath};
use crate::wait::settle;
use inbound_common::upload::{CreatedFile, FileDetection, UploadFile};
use tracing::{info, warn};

impl<B: Backend> InboundFlow<'_, B> {
    /// Write the placeholder files; files that fail to write are skipped.
    pub async fn create_upload_files(&mut self, files: &[UploadFile]) -> Vec<CreatedFile> {
        let mut created = Vec::with_capacity(files.len());
        for file in files {
            if let Some(done) = self.artifacts.create_test_file(file).await {
                info!(file = %done.name, "Created test file");
                created.push(done);
            }
        }
        created
    }

    /// Push every file through the file input and return how many were sent.
    ///
    /// Falls back to the "Upload files" trigger with all paths in one call
    /// when the one-by-one path fails.
    pub async fn upload_files(&mut self, files: &[CreatedFile]) -> usize {
        let mut sent = 0;
        match self.send_individually(files, &mut sent).await {
            Ok(()) => {
                info!(sent, "Total files uploaded");
                sent
            }
            Err(e) => {
                warn!("Upload method 1 failed, trying the upload trigger: {}", e);
                match self.send_via_trigger(files).await {
                    Ok(count) => {
                        info!(count, "Uploaded all files together");
                        count
                    }
                    Err(e) => {
                        warn!("Upload failed: {}", e);
                        sent
                    }
                }
            }
        }
    }

    async fn send_individually(
        &mut self,
        files: &[CreatedFile],
        sent: &mut usize,
    ) -> Result<(), BackendError> {
        let input = xpath(selectors::FILE_INPUT);
        for file in files {
            // Some upload widgets swap the input element after every selection.
            let element = self.backend.find(&input).await?;
            self.backend
                .send_keys(&element, &file.path.to_string_lossy())
                .await?;
            *sent += 1;
            info!(file = %file.name, "Uploaded");
            settle(self.config.delays.upload_settle_ms).await;
        }
        Ok(())
    }

    async fn send_via_trigger(&mut self, files: &[CreatedFile]) -> Result<usize, BackendError> {
        let trigger = self
            .backend
            .find(&xpath(selectors::UPLOAD_FILES_BUTTON))
            .await?;
        self.backend.click(&trigger).await?;
        settle(self.config.delays.upload_trigger_settle_ms).await;

        if files.is_empty() {
            return Ok(0);
        }
        let input = self.backend.find(&xpath(selectors::FILE_INPUT)).await?;
        let paths = files
            .iter()
            .map(|f| f.path.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("\n");
        self.backend.send_keys(&input, &paths).await?;
        Ok(files.len())
    }

    /// Elements that represent uploaded files: the primary indicator after a
    /// bounded wait, then the first alternative selector with any match.
    pub async fn find_uploaded_elements(&mut self) -> Vec<B::Element> {
        let waiter = self.waiter.with_timeout(self.config.timeouts.upload_wait());
        match waiter
            .all_present(&mut *self.backend, &xpath(selectors::UPLOADED_FILES_LIST))
            .await
        {
            Ok(elements) => {
                info!(count = elements.len(), "Files appeared in UI after wait");
                return elements;
            }
            Err(e) => warn!("Uploaded-files wait ended, trying alternative selectors: {}", e),
        }

        for locator in selectors::all(selectors::UPLOADED_FILES_ALTERNATIVES) {
            if let Ok(elements) = self.backend.find_all(&locator).await {
                if !elements.is_empty() {
                    info!(selector = %locator, count = elements.len(), "Found files using alternative selector");
                    return elements;
                }
            }
        }
        Vec::new()
    }

    /// Non-empty texts of the given elements.
    pub async fn element_texts(&mut self, elements: &[B::Element]) -> Vec<String> {
        let mut texts = Vec::new();
        for element in elements {
            if let Ok(text) = self.backend.text(element).await {
                let text = text.trim();
                if !text.is_empty() {
                    texts.push(text.to_string());
                }
            }
        }
        texts
    }

    /// Look for each file's name or extension anywhere in the page content.
    pub async fn detect_in_page(&mut self, files: &[UploadFile]) -> FileDetection {
        let source = match self.backend.page_source().await {
            Ok(source) => source,
            Err(e) => {
                warn!("Could not read page source: {}", e);
                String::new()
            }
        };
        FileDetection::scan(files, &source)
    }
}
