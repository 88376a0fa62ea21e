//! In-memory car catalog

use crate::latency::{StoreLatency, StoreOp};
use racer_core::model::{CarDraft, CarId, CarProfile};
use racer_core::{CarCatalog, StoreError, StoreResult};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

pub struct InMemoryCarCatalog {
    cars: RwLock<Vec<CarProfile>>,
    latency: StoreLatency,
}

impl InMemoryCarCatalog {
    pub fn new(cars: Vec<CarProfile>, latency: StoreLatency) -> Self {
        Self {
            cars: RwLock::new(cars),
            latency,
        }
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Vec<CarProfile>>> {
        self.cars
            .read()
            .map_err(|_| StoreError::Storage("car catalog lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Vec<CarProfile>>> {
        self.cars
            .write()
            .map_err(|_| StoreError::Storage("car catalog lock poisoned".to_string()))
    }
}

impl CarCatalog for InMemoryCarCatalog {
    fn list_cars(&self) -> StoreResult<Vec<CarProfile>> {
        self.latency.pause(StoreOp::List);
        let cars = self.read()?;
        debug!("Listing {} cars", cars.len());
        Ok(cars.clone())
    }

    fn get_car(&self, id: CarId) -> StoreResult<Option<CarProfile>> {
        self.latency.pause(StoreOp::Get);
        debug!("Looking up car {}", id);
        Ok(self.read()?.iter().find(|c| c.id == id).cloned())
    }

    fn create_car(&self, draft: CarDraft) -> StoreResult<CarProfile> {
        self.latency.pause(StoreOp::Write);
        let mut cars = self.write()?;
        let id = cars.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let car = draft.into_profile(id);
        debug!("Created car {} ({})", car.id, car.name);
        cars.push(car.clone());
        Ok(car)
    }

    fn update_car(&self, id: CarId, draft: CarDraft) -> StoreResult<CarProfile> {
        self.latency.pause(StoreOp::Write);
        let mut cars = self.write()?;
        let slot = cars
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StoreError::CarNotFound(id))?;
        *slot = draft.into_profile(id);
        debug!("Updated car {}", id);
        Ok(slot.clone())
    }

    fn delete_car(&self, id: CarId) -> StoreResult<CarProfile> {
        self.latency.pause(StoreOp::Delete);
        let mut cars = self.write()?;
        let index = cars
            .iter()
            .position(|c| c.id == id)
            .ok_or(StoreError::CarNotFound(id))?;
        debug!("Deleted car {}", id);
        Ok(cars.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> CarDraft {
        CarDraft {
            name: name.to_string(),
            description: String::new(),
            color: "#FFFFFF".to_string(),
            max_speed: 80.0,
            acceleration: 70.0,
            handling: 60.0,
        }
    }

    #[test]
    fn test_ids_follow_highest_existing() {
        let catalog = InMemoryCarCatalog::new(Vec::new(), StoreLatency::NONE);
        let first = catalog.create_car(draft("One")).unwrap();
        let second = catalog.create_car(draft("Two")).unwrap();
        assert_eq!((first.id, second.id), (1, 2));

        catalog.delete_car(1).unwrap();
        let third = catalog.create_car(draft("Three")).unwrap();
        assert_eq!(third.id, 3);
    }

    #[test]
    fn test_update_keeps_id() {
        let catalog = InMemoryCarCatalog::new(Vec::new(), StoreLatency::NONE);
        let car = catalog.create_car(draft("Old")).unwrap();

        let updated = catalog.update_car(car.id, draft("New")).unwrap();

        assert_eq!(updated.id, car.id);
        assert_eq!(catalog.get_car(car.id).unwrap().unwrap().name, "New");
    }

    #[test]
    fn test_missing_car() {
        let catalog = InMemoryCarCatalog::new(Vec::new(), StoreLatency::NONE);
        assert_eq!(catalog.get_car(7).unwrap(), None);
        assert_eq!(
            catalog.update_car(7, draft("X")),
            Err(StoreError::CarNotFound(7))
        );
        assert_eq!(catalog.delete_car(7), Err(StoreError::CarNotFound(7)));
    }
}
