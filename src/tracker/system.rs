//! The leave tracking orchestrator.
//!
//! [`LeaveTrackingSystem`] owns every employee and leave request, the set of
//! known departments and the FIFO queue of requests awaiting a decision.
//! Requests refer to employees by id; the system resolves the id to its own
//! employee record whenever a decision mutates balances or history.
//!
//! When a [`DataStore`] is attached, registry changes are written through to
//! the CSV files. Failures of those automatic saves are logged and never roll
//! back or corrupt the in-memory state; the explicit persistence methods
//! return them instead.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use tracing::{error, info, warn};

use crate::config::TrackerConfig;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{
    Employee, EmployeeId, LeaveKind, LeaveRequest, LeaveStatus, LeaveType, RequestId,
};
use crate::storage::{BackupFiles, DataStore, EmployeeRecord, LeaveRequestRecord, Snapshot};
use crate::validation::LeavePolicy;

use super::outcome::{ApprovalOutcome, INVALID_REQUEST_REASON};
use super::stats::{DepartmentReport, DepartmentStats};

/// Registries, pending queue and persistence for leave requests.
///
/// # Example
///
/// ```
/// use leave_tracker::models::{Employee, LeaveStatus, LeaveType};
/// use leave_tracker::tracker::LeaveTrackingSystem;
/// use leave_tracker::validation::LeavePolicy;
/// use chrono::NaiveDate;
///
/// let mut system = LeaveTrackingSystem::in_memory(LeavePolicy::default());
/// system.add_employee(Employee::new(101, "John Doe", "Engineering", 20, 10));
///
/// let request_id = system
///     .create_leave_request(
///         101,
///         NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
///         NaiveDate::from_ymd_opt(2025, 8, 5).unwrap(),
///         "Vacation",
///         LeaveType::Annual,
///         false,
///     )
///     .unwrap()
///     .id();
///
/// let outcomes = system.process_pending_requests("HR Manager").unwrap();
/// assert_eq!(outcomes[0].status, LeaveStatus::Approved);
/// assert_eq!(system.employee(101).unwrap().annual_leave_balance(), 15);
/// assert_eq!(system.request(request_id).unwrap().status(), LeaveStatus::Approved);
/// ```
#[derive(Debug)]
pub struct LeaveTrackingSystem {
    policy: LeavePolicy,
    employees: BTreeMap<EmployeeId, Employee>,
    requests: BTreeMap<RequestId, LeaveRequest>,
    pending_approvals: VecDeque<RequestId>,
    departments: BTreeSet<String>,
    next_request_id: RequestId,
    store: Option<DataStore>,
}

impl LeaveTrackingSystem {
    /// Creates an empty tracker with no persistence.
    pub fn in_memory(policy: LeavePolicy) -> Self {
        Self {
            policy,
            employees: BTreeMap::new(),
            requests: BTreeMap::new(),
            pending_approvals: VecDeque::new(),
            departments: BTreeSet::new(),
            next_request_id: 1,
            store: None,
        }
    }

    /// Opens the tracker described by `config`.
    ///
    /// Creates the data directories if needed, then loads employees and
    /// leave requests from the CSV files. Loaded requests keep their
    /// persisted status without replaying any decision; pending ones
    /// re-enter the queue in file order. Requests whose employee is unknown
    /// or whose leave type has no request kind are skipped.
    pub fn open(config: &TrackerConfig) -> TrackerResult<Self> {
        let store = DataStore::new(config);
        store.initialize()?;

        let employee_records = store.load_employees()?;
        let request_records = store.load_requests()?;

        let mut system = Self::in_memory(config.policy);
        for record in employee_records {
            system.register_employee(record.into());
        }
        for record in request_records {
            system.register_loaded_request(record);
        }
        system.store = Some(store);

        info!(
            data_dir = %config.data_dir.display(),
            employees = system.employees.len(),
            requests = system.requests.len(),
            pending = system.pending_approvals.len(),
            "Leave tracker opened"
        );
        Ok(system)
    }

    /// The validation policy in force.
    pub fn policy(&self) -> &LeavePolicy {
        &self.policy
    }

    /// The attached data store, if any.
    pub fn store(&self) -> Option<&DataStore> {
        self.store.as_ref()
    }

    /// Registers `employee`, replacing any employee with the same id, and
    /// saves the employees file.
    pub fn add_employee(&mut self, employee: Employee) {
        info!(
            employee_id = employee.id(),
            department = employee.department(),
            "Employee registered"
        );
        self.register_employee(employee);
        self.persist_employees();
    }

    /// Looks up an employee.
    pub fn employee(&self, employee_id: EmployeeId) -> Option<&Employee> {
        self.employees.get(&employee_id)
    }

    /// Mutable access to an employee.
    ///
    /// Changes made through this reference are not saved until the next
    /// write-through or an explicit [`save`](Self::save). Use
    /// [`set_employee_department`](Self::set_employee_department) to move
    /// an employee between departments.
    pub fn employee_mut(&mut self, employee_id: EmployeeId) -> Option<&mut Employee> {
        self.employees.get_mut(&employee_id)
    }

    /// All employees in id order.
    pub fn employees(&self) -> impl Iterator<Item = &Employee> {
        self.employees.values()
    }

    /// Moves an employee to `department` and saves the employees file.
    pub fn set_employee_department(
        &mut self,
        employee_id: EmployeeId,
        department: impl Into<String>,
    ) -> TrackerResult<()> {
        let employee = self
            .employees
            .get_mut(&employee_id)
            .ok_or(TrackerError::EmployeeNotFound { employee_id })?;

        employee.set_department(department);
        self.departments.insert(employee.department().to_string());
        self.persist_employees();
        Ok(())
    }

    /// Every department seen so far, sorted.
    pub fn departments(&self) -> impl Iterator<Item = &str> {
        self.departments.iter().map(String::as_str)
    }

    /// Looks up a leave request.
    pub fn request(&self, request_id: RequestId) -> Option<&LeaveRequest> {
        self.requests.get(&request_id)
    }

    /// All leave requests in id order.
    pub fn requests(&self) -> impl Iterator<Item = &LeaveRequest> {
        self.requests.values()
    }

    /// Ids waiting in the approval queue, front first.
    pub fn pending_approvals(&self) -> impl Iterator<Item = RequestId> + '_ {
        self.pending_approvals.iter().copied()
    }

    /// Id the next created request will receive.
    pub fn next_request_id(&self) -> RequestId {
        self.next_request_id
    }

    /// Creates a leave request and queues it for approval.
    ///
    /// The request gets the next sequential id and is saved to the requests
    /// file. Nothing changes and no id is consumed when the call fails.
    ///
    /// # Errors
    ///
    /// - [`TrackerError::UnsupportedLeaveType`] when `leave_type` has no
    ///   request kind
    /// - [`TrackerError::EmployeeNotFound`] when `employee_id` is unknown
    pub fn create_leave_request(
        &mut self,
        employee_id: EmployeeId,
        start_date: NaiveDate,
        end_date: NaiveDate,
        reason: impl Into<String>,
        leave_type: LeaveType,
        has_medical_certificate: bool,
    ) -> TrackerResult<&LeaveRequest> {
        let kind = LeaveKind::for_type(leave_type, has_medical_certificate)?;
        if !self.employees.contains_key(&employee_id) {
            return Err(TrackerError::EmployeeNotFound { employee_id });
        }

        let request_id = self.next_request_id;
        self.next_request_id += 1;

        let request =
            LeaveRequest::new(request_id, employee_id, start_date, end_date, reason, kind);
        info!(
            request_id,
            employee_id,
            leave_type = %leave_type,
            days = request.number_of_days(),
            "Leave request created"
        );

        self.requests.insert(request_id, request);
        self.pending_approvals.push_back(request_id);
        self.persist_requests();

        Ok(&self.requests[&request_id])
    }

    /// Decides every queued request in FIFO order.
    ///
    /// Valid requests are approved by `approver`; invalid ones are denied
    /// with [`INVALID_REQUEST_REASON`]. The requests file is saved after
    /// each decision and the employees file once the queue is empty.
    pub fn process_pending_requests(
        &mut self,
        approver: &str,
    ) -> TrackerResult<Vec<ApprovalOutcome>> {
        let mut outcomes = Vec::with_capacity(self.pending_approvals.len());

        while let Some(request_id) = self.pending_approvals.pop_front() {
            let Some(request) = self.requests.get_mut(&request_id) else {
                warn!(request_id, "Queued leave request is not registered");
                continue;
            };
            if request.status() != LeaveStatus::Pending {
                warn!(
                    request_id,
                    status = %request.status(),
                    "Skipping queued leave request that is already decided"
                );
                continue;
            }
            let employee_id = request.employee_id();
            let Some(employee) = self.employees.get_mut(&employee_id) else {
                warn!(request_id, employee_id, "Queued leave request has no employee");
                continue;
            };

            let rejection = match request.validate(employee, &self.policy) {
                Ok(()) => {
                    request.approve(employee, approver, &self.policy)?;
                    None
                }
                Err(rejection) => {
                    request.deny(employee, approver, INVALID_REQUEST_REASON)?;
                    Some(rejection)
                }
            };

            let outcome = ApprovalOutcome {
                request_id,
                employee_id,
                status: request.status(),
                rejection,
            };
            match &outcome.rejection {
                None => info!(request_id, employee_id, approver, "Leave request approved"),
                Some(rejection) => info!(
                    request_id,
                    employee_id,
                    approver,
                    reason = %rejection,
                    "Leave request denied"
                ),
            }

            outcomes.push(outcome);
            self.persist_requests();
        }

        if !outcomes.is_empty() {
            self.persist_employees();
        }
        Ok(outcomes)
    }

    /// Decided requests of an employee in decision order; empty when the
    /// employee is unknown.
    pub fn employee_leave_history(&self, employee_id: EmployeeId) -> Vec<&LeaveRequest> {
        self.employees
            .get(&employee_id)
            .map(|employee| {
                employee
                    .leave_history()
                    .iter()
                    .filter_map(|request_id| self.requests.get(request_id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Counts pending requests per known department.
    ///
    /// A request counts towards the department its employee belongs to now.
    pub fn department_stats(&self) -> DepartmentReport {
        let departments = self
            .departments
            .iter()
            .map(|department| {
                let pending_requests = self
                    .requests
                    .values()
                    .filter(|request| request.status() == LeaveStatus::Pending)
                    .filter(|request| {
                        self.employees
                            .get(&request.employee_id())
                            .is_some_and(|employee| employee.department() == department)
                    })
                    .count();
                DepartmentStats {
                    department: department.clone(),
                    pending_requests,
                }
            })
            .collect();

        DepartmentReport { departments }
    }

    /// Writes both CSV files.
    pub fn save(&self) -> TrackerResult<()> {
        let store = self.attached_store()?;
        store.save_employees(&self.employee_records())?;
        store.save_requests(&self.request_records())
    }

    /// Saves both CSV files and copies them into the backup directory,
    /// suffixed with today's date.
    pub fn create_backup(&self) -> TrackerResult<BackupFiles> {
        self.save()?;
        self.attached_store()?.create_backup(Utc::now().date_naive())
    }

    /// Captures the complete state, including histories and ledgers.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            employees: self.employees.values().cloned().collect(),
            requests: self.requests.values().cloned().collect(),
            next_request_id: self.next_request_id,
        }
    }

    /// Writes [`snapshot`](Self::snapshot) to `name` inside the data directory.
    pub fn save_snapshot(&self, name: &str) -> TrackerResult<PathBuf> {
        self.attached_store()?.write_snapshot(name, &self.snapshot())
    }

    /// Replaces the whole state with the snapshot stored under `name`.
    ///
    /// The current state is only cleared once the snapshot has been read
    /// and parsed.
    pub fn load_snapshot(&mut self, name: &str) -> TrackerResult<()> {
        let snapshot = self.attached_store()?.read_snapshot(name)?;
        self.restore(snapshot);
        info!(
            snapshot = name,
            employees = self.employees.len(),
            requests = self.requests.len(),
            "Snapshot loaded"
        );
        Ok(())
    }

    /// Replaces the whole state with `snapshot`.
    ///
    /// Departments and the pending queue are rebuilt, requests whose
    /// employee is absent are dropped, and the id counter is raised past
    /// every restored request id.
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.employees.clear();
        self.requests.clear();
        self.pending_approvals.clear();
        self.departments.clear();
        self.next_request_id = snapshot.next_request_id.max(1);

        for employee in snapshot.employees {
            self.register_employee(employee);
        }

        for request in snapshot.requests {
            if !self.employees.contains_key(&request.employee_id()) {
                warn!(
                    request_id = request.id(),
                    employee_id = request.employee_id(),
                    "Dropping snapshot request without employee"
                );
                continue;
            }
            self.register_request(request);
        }
    }

    fn register_employee(&mut self, employee: Employee) {
        self.departments.insert(employee.department().to_string());
        self.employees.insert(employee.id(), employee);
    }

    /// A repeated id replaces the earlier request and keeps at most one
    /// queue entry for it.
    fn register_request(&mut self, request: LeaveRequest) {
        let request_id = request.id();
        if self.requests.contains_key(&request_id) {
            warn!(request_id, "Replacing leave request with a repeated id");
            self.pending_approvals.retain(|queued| *queued != request_id);
        }
        if request.status() == LeaveStatus::Pending {
            self.pending_approvals.push_back(request_id);
        }
        self.next_request_id = self.next_request_id.max(request_id + 1);
        self.requests.insert(request_id, request);
    }

    fn register_loaded_request(&mut self, record: LeaveRequestRecord) {
        let request_id = record.request_id;
        if !self.employees.contains_key(&record.employee_id) {
            warn!(
                request_id,
                employee_id = record.employee_id,
                "Skipping leave request for unknown employee"
            );
            return;
        }

        match LeaveRequest::try_from(record) {
            Ok(request) => self.register_request(request),
            Err(err) => warn!(request_id, error = %err, "Skipping unreadable leave request"),
        }
    }

    fn attached_store(&self) -> TrackerResult<&DataStore> {
        self.store.as_ref().ok_or(TrackerError::StoreNotAttached)
    }

    fn employee_records(&self) -> Vec<EmployeeRecord> {
        self.employees.values().map(EmployeeRecord::from).collect()
    }

    fn request_records(&self) -> Vec<LeaveRequestRecord> {
        self.requests.values().map(LeaveRequestRecord::from).collect()
    }

    fn persist_employees(&self) {
        if let Some(store) = &self.store {
            if let Err(err) = store.save_employees(&self.employee_records()) {
                error!(error = %err, "Failed to save employees");
            }
        }
    }

    fn persist_requests(&self) {
        if let Some(store) = &self.store {
            if let Err(err) = store.save_requests(&self.request_records()) {
                error!(error = %err, "Failed to save leave requests");
            }
        }
    }
}
