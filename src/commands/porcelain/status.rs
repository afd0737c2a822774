use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::artifacts::status::status_info::StatusInfo;

impl Repository {
    pub fn status(&self) -> anyhow::Result<()> {
        let head = self.head_commit()?;
        let workspace_files = self.workspace().list_files()?;

        let status = StatusInfo::inspect(
            self.branches(),
            head.tree(),
            self.index(),
            &workspace_files,
            |name| Ok(self.workspace().parse_blob(name)?.object_id()?),
        )?;

        status.render(&mut **self.writer())
    }
}
