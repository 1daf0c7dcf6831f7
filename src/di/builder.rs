use crate::di::Container;

/// Seeds a [`Container`] with infrastructure, such as configuration, that
/// modules resolve while they register
#[derive(Default)]
pub struct ContainerBuilder {
    container: Container,
}

impl ContainerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T: 'static + Send + Sync>(mut self, instance: T) -> Self {
        self.container.register(instance);
        self
    }

    pub fn build(self) -> Container {
        self.container
    }
}
