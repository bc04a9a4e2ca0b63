use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Service: index on owner_id for tenant-scoped listing
        manager
            .create_index(
                Index::create()
                    .name("idx_service_owner")
                    .table(Service::Table)
                    .col(Service::OwnerId)
                    .to_owned(),
            )
            .await?;

        // Appointment: index on owner_id
        manager
            .create_index(
                Index::create()
                    .name("idx_appointment_owner")
                    .table(Appointment::Table)
                    .col(Appointment::OwnerId)
                    .to_owned(),
            )
            .await?;

        // Appointment: index on service_id for joins
        manager
            .create_index(
                Index::create()
                    .name("idx_appointment_service")
                    .table(Appointment::Table)
                    .col(Appointment::ServiceId)
                    .to_owned(),
            )
            .await?;

        // Appointment: composite (owner_id, start_time) for calendar ranges
        manager
            .create_index(
                Index::create()
                    .name("idx_appointment_owner_start")
                    .table(Appointment::Table)
                    .col(Appointment::OwnerId)
                    .col(Appointment::StartTime)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_service_owner").table(Service::Table).to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop().name("idx_appointment_owner").table(Appointment::Table).to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop().name("idx_appointment_service").table(Appointment::Table).to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_appointment_owner_start")
                    .table(Appointment::Table)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Service { Table, OwnerId }

#[derive(DeriveIden)]
enum Appointment { Table, OwnerId, ServiceId, StartTime }
