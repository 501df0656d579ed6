use {
    std::{
        fs, io,
        path::{Path, PathBuf},
        str::FromStr,
        sync::Mutex,
    },
    voting_types::{Address, Error, Result},
};

/// Client-local persistence of the active wallet address.
pub trait IdentityStore: Send + Sync {
    fn load(&self) -> Result<Option<Address>>;

    fn save(&self, address: Address) -> Result<()>;

    fn clear(&self) -> Result<()>;
}

/// Keeps the address as a single line of text in a file.
pub struct FileIdentityStore {
    path: PathBuf,
}

impl FileIdentityStore {
    pub fn new<P>(path: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IdentityStore for FileIdentityStore {
    fn load(&self) -> Result<Option<Address>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(Error::storage(err)),
        };

        let content = content.trim();
        if content.is_empty() {
            return Ok(None);
        }

        Address::from_str(content).map(Some).map_err(|err| {
            Error::Storage(format!(
                "malformed address in {}: {err}",
                self.path.display()
            ))
        })
    }

    fn save(&self, address: Address) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(Error::storage)?;
        }

        fs::write(&self.path, address.to_checksum(None)).map_err(Error::storage)
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(Error::storage(err)),
            _ => Ok(()),
        }
    }
}

#[derive(Default)]
pub struct MemoryIdentityStore {
    inner: Mutex<Option<Address>>,
}

impl MemoryIdentityStore {
    pub fn with_identity(address: Address) -> Self {
        Self {
            inner: Mutex::new(Some(address)),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<Address>>> {
        self.inner
            .lock()
            .map_err(|_| Error::Storage("identity lock poisoned".to_string()))
    }
}

impl IdentityStore for MemoryIdentityStore {
    fn load(&self) -> Result<Option<Address>> {
        Ok(*self.lock()?)
    }

    fn save(&self, address: Address) -> Result<()> {
        *self.lock()? = Some(address);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.lock()? = None;
        Ok(())
    }
}

/// The identity of the current user, loaded from an [`IdentityStore`] when the
/// session starts and written back whenever it changes.
///
/// Components that need to know who the caller is take a reference to the
/// context instead of reading the store themselves.
pub struct SessionContext<S> {
    store: S,
    identity: Option<Address>,
}

impl<S> SessionContext<S> {
    pub fn identity(&self) -> Option<Address> {
        self.identity
    }

    pub fn require_identity(&self) -> Result<Address> {
        self.identity.ok_or(Error::NotConnected)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S> SessionContext<S>
where
    S: IdentityStore,
{
    pub fn init(store: S) -> Result<Self> {
        let identity = store.load()?;

        Ok(Self { store, identity })
    }

    pub(crate) fn establish(&mut self, address: Address) -> Result<()> {
        self.store.save(address)?;
        self.identity = Some(address);

        Ok(())
    }

    /// Forget the identity, both in memory and in the store.
    pub fn teardown(&mut self) -> Result<()> {
        self.identity = None;
        self.store.clear()
    }
}

// ----------------------------------- tests -----------------------------------
